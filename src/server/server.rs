//! # Mock Server
//!
//! One axum fallback route serves every declared operation: the base path
//! is stripped, the path is matched against the declared templates and
//! the operation is dispatched through the handler registry.
//!
//! Only CORS preflights (OPTIONS with `Origin` and
//! `Access-Control-Request-Method`) are answered by the CORS layer; any
//! other OPTIONS request reaches the declared operation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, Method};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::descriptor::{ApiDocument, DescriptorResult, HttpMethod};
use crate::dispatch::{HandlerRegistry, MockError, MockRequest, RequestBody};
use crate::query::QueryString;
use crate::store::DataStore;
use crate::upload::UploadDir;

use super::body;
use super::config::MockConfig;
use super::routes::RouteTable;

/// State shared by every request
pub struct MockState {
    pub routes: RouteTable,
    pub registry: HandlerRegistry,
    pub uploads: UploadDir,
}

/// HTTP server for a mocked API
pub struct MockServer {
    config: MockConfig,
    router: Router,
}

impl MockServer {
    /// Serve `document` from `store` with the built-in handlers
    pub fn new(
        document: &ApiDocument,
        store: Arc<dyn DataStore>,
        config: MockConfig,
    ) -> DescriptorResult<Self> {
        let routes = RouteTable::from_document(document)?;
        let registry = HandlerRegistry::for_operations(routes.routes(), store, config.array_match);
        Ok(Self::with_registry(routes, registry, config))
    }

    /// Serve `routes` with a custom registry
    pub fn with_registry(routes: RouteTable, registry: HandlerRegistry, config: MockConfig) -> Self {
        let state = Arc::new(MockState {
            routes,
            registry,
            uploads: UploadDir::new(config.upload_dir.clone()),
        });
        let router = Self::build_router(state, &config);
        Self { config, router }
    }

    fn build_router(state: Arc<MockState>, config: &MockConfig) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .fallback(serve_operation)
            .with_state(state.clone())
            .layer(cors)
            .layer(middleware::from_fn_with_state(state, bypass_cors))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        tracing::info!(event = "SERVER_STARTED", addr = %listener.local_addr()?);

        let app = self.router.layer(middleware::from_fn(frame_options_body));
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Whether `request` is a CORS preflight rather than a plain OPTIONS call
fn is_preflight(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && request.headers().contains_key(header::ORIGIN)
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Send plain OPTIONS requests straight to the operation; the CORS layer
/// would answer them as preflights.
async fn bypass_cors(state: State<Arc<MockState>>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS && !is_preflight(&request) {
        serve_operation(state, request).await
    } else {
        next.run(request).await
    }
}

/// HTTP/1.1 frames an OPTIONS body by its Content-Length, so the declared
/// length of a suppressed body cannot go on the wire.
async fn frame_options_body(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options {
        response.headers_mut().remove(header::CONTENT_LENGTH);
    }
    response
}

async fn serve_operation(State(state): State<Arc<MockState>>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    let raw_method = request.method().clone();

    let Ok(method) = raw_method.as_str().parse::<HttpMethod>() else {
        return not_found(raw_method.as_str(), &path);
    };
    let Some((route, params)) = state.routes.resolve(method, &path) else {
        return not_found(method.as_str(), &path);
    };

    let query = QueryString::parse(request.uri().query().unwrap_or(""));
    let body = if body::has_body(&raw_method) {
        match body::decode(request, &state.uploads).await {
            Ok(body) => body,
            Err(err) => return failure(err, method),
        }
    } else {
        RequestBody::Empty
    };

    let collection = state.routes.canonical_path(route, &params);
    let mut mock_request = MockRequest::new(method, collection)
        .with_query(query)
        .with_body(body);
    mock_request.params = params;

    let Some(pending) = state.registry.dispatch(&route.operation, &mock_request) else {
        let id = route.operation_id().unwrap_or(route.template.as_str()).to_string();
        tracing::warn!(event = "OPERATION_UNHANDLED", method = %method, operation = %id);
        return MockError::NotImplemented(id).into_response();
    };

    match pending.await {
        Ok(formatted) => formatted.into_response(),
        Err(err) => failure(err, method),
    }
}

fn not_found(method: &str, path: &str) -> Response {
    tracing::debug!(event = "ROUTE_NOT_FOUND", method, path);
    MockError::NotFound {
        method: method.to_string(),
        path: path.to_string(),
    }
    .into_response()
}

fn failure(err: MockError, method: HttpMethod) -> Response {
    tracing::error!(
        event = "OPERATION_FAILED",
        method = %method,
        status = err.status_code().as_u16(),
        error = %err
    );
    err.to_formatted(method).into_response()
}
