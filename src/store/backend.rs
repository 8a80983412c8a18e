//! # Data Store Trait
//!
//! Asynchronous access to stored resources. Every call returns a boxed
//! future resolving to a `StoreResult`; implementations never panic into
//! request handling.

use futures_util::future::BoxFuture;

use super::errors::StoreResult;
use super::resource::{Resource, ResourceData};

/// Predicate evaluated against a resource's data
pub type Predicate<'a> = &'a (dyn Fn(&ResourceData) -> bool + Send + Sync);

/// Builds the resource to insert from the collection's current contents
pub type Assign<'a> = Box<dyn FnOnce(&[Resource]) -> Resource + Send + 'a>;

/// Ordered, keyed resource storage
pub trait DataStore: Send + Sync {
    /// Upsert resources, refreshing their `modified_on`.
    ///
    /// Returns the resources as stored. Either every resource of the call
    /// is written or none is.
    fn save(&self, resources: Vec<Resource>) -> BoxFuture<'_, StoreResult<Vec<Resource>>>;

    /// Upsert the resource built by `assign` from the current contents of
    /// `collection`.
    ///
    /// No other write to the collection lands between reading its contents
    /// and storing the result.
    fn insert_with<'a>(
        &'a self,
        collection: &'a str,
        assign: Assign<'a>,
    ) -> BoxFuture<'a, StoreResult<Resource>>;

    /// Read back one resource
    fn get<'a>(
        &'a self,
        collection: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Resource>>>;

    /// Resources of a collection whose data satisfies `predicate`, in
    /// insertion order
    fn filter<'a>(
        &'a self,
        collection: &'a str,
        predicate: Predicate<'a>,
    ) -> BoxFuture<'a, StoreResult<Vec<Resource>>>;

    /// Remove one resource, returning it if it existed
    fn remove<'a>(
        &'a self,
        collection: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Resource>>>;

    /// Every resource of a collection, in insertion order
    fn list<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, StoreResult<Vec<Resource>>> {
        self.filter(collection, &match_all)
    }
}

fn match_all(_: &ResourceData) -> bool {
    true
}
