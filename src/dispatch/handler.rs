//! # Operation Handlers
//!
//! A handler serves one declared operation against the resource store.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{HttpMethod, OperationDescriptor};
use crate::query::{ArrayMatch, FilterPredicate};
use crate::response::{FormattedResponse, ResponseFormatter};
use crate::store::{DataStore, Resource, ResourceData};
use crate::upload;

use super::errors::{MockError, MockResult};
use super::request::{MockRequest, RequestBody};

/// Serves a declared operation
pub trait OperationHandler: Send + Sync {
    fn handle<'a>(
        &'a self,
        operation: &'a OperationDescriptor,
        request: &'a MockRequest,
    ) -> BoxFuture<'a, MockResult<FormattedResponse>>;
}

/// Lists a collection, filtered by the operation's declared query
/// parameters
pub struct QueryCollection {
    store: Arc<dyn DataStore>,
    array_match: ArrayMatch,
}

impl QueryCollection {
    pub fn new(store: Arc<dyn DataStore>, array_match: ArrayMatch) -> Self {
        Self { store, array_match }
    }

    async fn query(
        &self,
        operation: &OperationDescriptor,
        request: &MockRequest,
    ) -> MockResult<FormattedResponse> {
        let predicate =
            FilterPredicate::build(operation.query_parameters(), &request.query, self.array_match)?;
        let matcher = |data: &ResourceData| predicate.matches(data);
        let resources = self.store.filter(&request.path, &matcher).await?;

        let (status, response) = operation.success_response();
        let formatted = ResponseFormatter::new(status, response, request.method, &request.path)
            .format(&resources, request.upstream_body.as_ref())?;

        tracing::info!(
            event = "QUERY_COLLECTION",
            method = %request.method,
            collection = %request.path,
            criteria = predicate.criteria().len(),
            matched = resources.len(),
            status = formatted.status,
            content_length = ?formatted.content_length
        );

        Ok(formatted)
    }
}

impl OperationHandler for QueryCollection {
    fn handle<'a>(
        &'a self,
        operation: &'a OperationDescriptor,
        request: &'a MockRequest,
    ) -> BoxFuture<'a, MockResult<FormattedResponse>> {
        Box::pin(self.query(operation, request))
    }
}

/// Adds one resource to a collection from a JSON or multipart body
pub struct AddResource {
    store: Arc<dyn DataStore>,
}

impl AddResource {
    /// Property holding the generated identifier
    pub const ID_PROPERTY: &'static str = "ID";

    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    async fn add(
        &self,
        operation: &OperationDescriptor,
        request: &MockRequest,
    ) -> MockResult<FormattedResponse> {
        let data = match &request.body {
            RequestBody::Json(value) => value.clone(),
            RequestBody::Multipart { fields, files } => upload::adapt(files, fields),
            RequestBody::Empty => {
                return Err(MockError::InvalidBody("request body is empty".to_string()))
            }
        };

        let collection = request.path.as_str();
        let resource = self
            .store
            .insert_with(
                collection,
                Box::new(move |existing: &[Resource]| identify(collection, data, existing)),
            )
            .await?;
        let location = resource.path();
        let saved = vec![resource];

        let (status, response) = operation.success_response();
        let status = if response.is_none() { 201 } else { status };
        let mut formatted = ResponseFormatter::new(status, response, request.method, &request.path)
            .format(&saved, None)?;

        // A created resource is returned on its own, not as a list
        let is_list = formatted
            .body
            .as_deref()
            .map_or(false, |body| body.first() == Some(&b'['));
        if let Some(value) = saved.first().and_then(|r| r.data.as_json()).filter(|_| is_list) {
            let single = serde_json::to_vec(value)?;
            formatted.content_length = Some(single.len());
            formatted.body = Some(single);
        }
        formatted.location = Some(location.clone());

        tracing::info!(
            event = "RESOURCE_ADDED",
            collection = %request.path,
            location = %location,
            status = formatted.status
        );

        Ok(formatted)
    }
}

impl OperationHandler for AddResource {
    fn handle<'a>(
        &'a self,
        operation: &'a OperationDescriptor,
        request: &'a MockRequest,
    ) -> BoxFuture<'a, MockResult<FormattedResponse>> {
        Box::pin(self.add(operation, request))
    }
}

/// Name the new resource after its `ID`, assigning the next free one
/// when the data has none
fn identify(collection: &str, mut data: Value, existing: &[Resource]) -> Resource {
    let id = match data.get(AddResource::ID_PROPERTY) {
        Some(id) => id_segment(id),
        None => {
            let next = next_id(existing);
            if let Value::Object(map) = &mut data {
                map.insert(AddResource::ID_PROPERTY.to_string(), Value::from(next));
            }
            next.to_string()
        }
    };
    Resource::new(collection, id, data)
}

/// One more than the largest numeric `ID` in the collection
fn next_id(existing: &[Resource]) -> i64 {
    existing
        .iter()
        .filter_map(|r| r.data.as_json())
        .filter_map(|data| data.get(AddResource::ID_PROPERTY))
        .filter_map(Value::as_i64)
        .max()
        .map_or(1, |max| max + 1)
}

fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether `method` is served by listing the collection
pub fn is_query_method(method: HttpMethod) -> bool {
    matches!(method, HttpMethod::Get | HttpMethod::Head | HttpMethod::Options)
}
