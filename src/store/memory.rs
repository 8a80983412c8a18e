//! # In-Memory Data Store
//!
//! Collections live in an insertion-ordered map; each collection is an
//! ordered list of resources. A replaced resource keeps its position.

use std::future::Future;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use futures_util::future::BoxFuture;
use indexmap::IndexMap;

use super::backend::{Assign, DataStore, Predicate};
use super::errors::{StoreError, StoreResult};
use super::resource::{normalize_collection, Resource};

/// Hook consulted before a collection is opened for reading or writing
pub type OpenHook = Arc<dyn Fn(String) -> BoxFuture<'static, StoreResult<()>> + Send + Sync>;

/// In-memory resource store
pub struct MemoryDataStore {
    /// Collection path -> resources in insertion order
    collections: RwLock<IndexMap<String, Vec<Resource>>>,

    /// Failure injection for tests
    open_hook: Option<OpenHook>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(IndexMap::new()),
            open_hook: None,
        }
    }

    /// Install a hook that runs every time a collection is opened.
    ///
    /// An error returned by the hook fails the whole store call.
    pub fn with_open_hook<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StoreResult<()>> + Send + 'static,
    {
        self.open_hook = Some(Arc::new(
            move |collection| -> BoxFuture<'static, StoreResult<()>> { Box::pin(hook(collection)) },
        ));
        self
    }

    /// A store whose every open fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new().with_open_hook(move |collection| {
            let message = message.clone();
            async move { Err(StoreError::open(collection, message)) }
        })
    }

    /// Known collection paths, in the order they were first written
    pub fn collections(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections.keys().cloned().collect())
    }

    /// Number of resources in a collection
    pub fn len(&self, collection: &str) -> StoreResult<usize> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections
            .get(&normalize_collection(collection))
            .map_or(0, Vec::len))
    }

    async fn open(&self, collection: &str) -> StoreResult<()> {
        match &self.open_hook {
            Some(hook) => hook(collection.to_string()).await,
            None => Ok(()),
        }
    }
}

/// Replace the resource of the same name in place, or append it
fn upsert(items: &mut Vec<Resource>, mut resource: Resource) -> Resource {
    let now = Utc::now();
    match items.iter_mut().find(|r| r.name == resource.name) {
        Some(existing) => {
            resource.modified_on = now.max(existing.modified_on);
            *existing = resource.clone();
        }
        None => {
            resource.modified_on = now;
            items.push(resource.clone());
        }
    }

    tracing::trace!(
        event = "RESOURCE_SAVED",
        collection = %resource.collection,
        name = %resource.name
    );
    resource
}

impl Default for MemoryDataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore for MemoryDataStore {
    fn save(&self, resources: Vec<Resource>) -> BoxFuture<'_, StoreResult<Vec<Resource>>> {
        Box::pin(async move {
            // Open every touched collection before the first write
            let mut opened: Vec<&str> = Vec::new();
            for resource in &resources {
                if !opened.contains(&resource.collection.as_str()) {
                    self.open(&resource.collection).await?;
                    opened.push(&resource.collection);
                }
            }

            let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
            let mut saved = Vec::with_capacity(resources.len());

            for resource in resources {
                let items = collections.entry(resource.collection.clone()).or_default();
                saved.push(upsert(items, resource));
            }

            Ok(saved)
        })
    }

    fn insert_with<'a>(
        &'a self,
        collection: &'a str,
        assign: Assign<'a>,
    ) -> BoxFuture<'a, StoreResult<Resource>> {
        Box::pin(async move {
            let collection = normalize_collection(collection);
            self.open(&collection).await?;

            // The write lock covers both the read and the write
            let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
            let items = collections.entry(collection.clone()).or_default();
            let mut resource = assign(items);
            resource.collection = collection;
            Ok(upsert(items, resource))
        })
    }

    fn get<'a>(
        &'a self,
        collection: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Resource>>> {
        Box::pin(async move {
            let collection = normalize_collection(collection);
            self.open(&collection).await?;

            let name = if name.starts_with('/') {
                name.to_string()
            } else {
                format!("/{}", name)
            };

            let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
            Ok(collections
                .get(&collection)
                .and_then(|items| items.iter().find(|r| r.name == name))
                .cloned())
        })
    }

    fn filter<'a>(
        &'a self,
        collection: &'a str,
        predicate: Predicate<'a>,
    ) -> BoxFuture<'a, StoreResult<Vec<Resource>>> {
        Box::pin(async move {
            let collection = normalize_collection(collection);
            self.open(&collection).await?;

            let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
            Ok(collections
                .get(&collection)
                .map(|items| {
                    items
                        .iter()
                        .filter(|r| predicate(&r.data))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default())
        })
    }

    fn remove<'a>(
        &'a self,
        collection: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Resource>>> {
        Box::pin(async move {
            let collection = normalize_collection(collection);
            self.open(&collection).await?;

            let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
            let removed = collections.get_mut(&collection).and_then(|items| {
                let idx = items
                    .iter()
                    .position(|r| r.name == name || r.name.trim_start_matches('/') == name)?;
                Some(items.remove(idx))
            });
            Ok(removed)
        })
    }
}
