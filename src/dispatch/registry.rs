//! # Handler Registry
//!
//! Explicit operation id → handler table, built once at startup.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use indexmap::IndexMap;

use crate::descriptor::{HttpMethod, OperationDescriptor, RoutedOperation};
use crate::query::ArrayMatch;
use crate::response::FormattedResponse;
use crate::store::DataStore;

use super::errors::MockResult;
use super::handler::{is_query_method, AddResource, OperationHandler, QueryCollection};
use super::request::MockRequest;

/// Operation handlers keyed by operation id
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: IndexMap<String, Arc<dyn OperationHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    ///
    /// The first registration for an id wins; returns `false` when the id
    /// was already taken.
    pub fn register(
        &mut self,
        operation_id: impl Into<String>,
        handler: Arc<dyn OperationHandler>,
    ) -> bool {
        let operation_id = operation_id.into();
        if self.handlers.contains_key(&operation_id) {
            tracing::warn!(event = "HANDLER_ALREADY_REGISTERED", operation_id = %operation_id);
            return false;
        }
        self.handlers.insert(operation_id, handler);
        true
    }

    /// Wire the built-in handlers for every declared operation.
    ///
    /// GET, HEAD and OPTIONS list the collection; POST adds a resource.
    /// Other methods stay unhandled.
    pub fn for_operations(
        operations: &[RoutedOperation],
        store: Arc<dyn DataStore>,
        array_match: ArrayMatch,
    ) -> Self {
        let query: Arc<dyn OperationHandler> =
            Arc::new(QueryCollection::new(store.clone(), array_match));
        let add: Arc<dyn OperationHandler> = Arc::new(AddResource::new(store));

        let mut registry = Self::new();
        for routed in operations {
            let Some(id) = routed.operation_id() else {
                continue;
            };
            match routed.method {
                method if is_query_method(method) => {
                    registry.register(id, query.clone());
                }
                HttpMethod::Post => {
                    registry.register(id, add.clone());
                }
                _ => {}
            }
        }
        registry
    }

    pub fn get(&self, operation_id: &str) -> Option<Arc<dyn OperationHandler>> {
        self.handlers.get(operation_id).cloned()
    }

    pub fn contains(&self, operation_id: &str) -> bool {
        self.handlers.contains_key(operation_id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for `operation`.
    ///
    /// Returns `None` when the operation has no id or nothing is
    /// registered for it.
    pub fn dispatch<'a>(
        &'a self,
        operation: &'a OperationDescriptor,
        request: &'a MockRequest,
    ) -> Option<BoxFuture<'a, MockResult<FormattedResponse>>> {
        let id = operation.operation_id.as_deref()?;
        let handler = self.handlers.get(id)?;
        Some(handler.handle(operation, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ApiDocument;
    use crate::store::MemoryDataStore;
    use serde_json::json;

    struct Fixed(u16);

    impl OperationHandler for Fixed {
        fn handle<'a>(
            &'a self,
            _operation: &'a OperationDescriptor,
            _request: &'a MockRequest,
        ) -> BoxFuture<'a, MockResult<FormattedResponse>> {
            let status = self.0;
            Box::pin(async move { Ok(FormattedResponse::empty(status)) })
        }
    }

    #[tokio::test]
    async fn test_first_registration_wins() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.register("findPets", Arc::new(Fixed(200))));
        assert!(!registry.register("findPets", Arc::new(Fixed(418))));

        let op = OperationDescriptor::new("findPets");
        let request = MockRequest::get("/pets");
        let formatted = registry.dispatch(&op, &request).unwrap().await.unwrap();
        assert_eq!(formatted.status, 200);
    }

    #[test]
    fn test_unmatched_falls_through() {
        let registry = HandlerRegistry::new();
        let request = MockRequest::get("/pets");
        assert!(registry.dispatch(&OperationDescriptor::new("nope"), &request).is_none());
        assert!(registry.dispatch(&OperationDescriptor::default(), &request).is_none());
    }

    #[test]
    fn test_for_operations() {
        let doc: ApiDocument = serde_json::from_value(json!({
            "paths": {
                "/pets": {
                    "get": {"operationId": "findPets"},
                    "post": {"operationId": "addPet"},
                    "delete": {"operationId": "deletePets"},
                    "head": {}
                }
            }
        }))
        .unwrap();

        let registry = HandlerRegistry::for_operations(
            &doc.operations().unwrap(),
            Arc::new(MemoryDataStore::new()),
            ArrayMatch::Any,
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("findPets"));
        assert!(registry.contains("addPet"));
        assert!(!registry.contains("deletePets"));
    }
}
