//! Matchit routing configuration.

use std::sync::Arc;

use hyper::{body::Bytes, Request, Response};
use matchit::Router as MatchitRouter;

use crate::handlers;
use registry_core::{RegistryConfig, StudentStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Student store instance
    pub store: Arc<StudentStore>,
    /// Service configuration
    pub config: Arc<RegistryConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the registry routes.
    pub fn new(store: Arc<StudentStore>, config: Arc<RegistryConfig>) -> Self {
        let mut router = MatchitRouter::new();

        // Health/greeting endpoint
        router
            .insert("/hello", RouteHandler::Hello)
            .expect("Failed to insert /hello route");

        // Student collection endpoints
        router
            .insert("/students", RouteHandler::Students)
            .expect("Failed to insert /students route");
        router
            .insert("/students/{id}", RouteHandler::Student)
            .expect("Failed to insert /students/{id} route");

        Self {
            inner: router,
            state: AppState { store, config },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// # Arguments
    /// * `req` - HTTP request
    ///
    /// # Returns
    /// `Result<Response<Bytes>, RouterError>` containing the response or an error.
    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
    ) -> Result<Response<Bytes>, RouterError> {
        let path = req.uri().path().to_string();

        // Match the route
        match self.inner.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                handler
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => {
                // Return 404 for unmatched routes
                let body = handlers::ErrorBody {
                    error: format!("No route found for {}", path),
                };
                let json = serde_json::to_vec(&body).map_err(|e| {
                    RouterError::InternalError(format!("Failed to serialize error response: {}", e))
                })?;
                Ok(Response::builder()
                    .status(404)
                    .header("Content-Type", "application/json")
                    .body(Bytes::from(json))
                    .map_err(|e| {
                        RouterError::InternalError(format!("Failed to build response: {}", e))
                    })?)
            }
        }
    }
}

/// Route handler function.
enum RouteHandler {
    Hello,
    Students,
    Student,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle(
        &self,
        req: Request<hyper::body::Incoming>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError> {
        match self {
            RouteHandler::Hello => {
                if req.method() == hyper::Method::GET {
                    handlers::hello(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Students => {
                if req.method() == hyper::Method::POST {
                    handlers::create_student(req, params, state).await
                } else if req.method() == hyper::Method::GET {
                    handlers::list_students(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Student => {
                let has_id_param = params.get("id").is_some();
                if req.method() == hyper::Method::PUT && has_id_param {
                    handlers::update_student(req, params, state).await
                } else if req.method() == hyper::Method::DELETE && has_id_param {
                    handlers::delete_student(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed"),
            RouterError::InternalError(msg) => (500, msg.as_str()),
            RouterError::Timeout => (408, "Request Timeout"),
            RouterError::BadRequest(msg) => (400, msg.as_str()),
            RouterError::NotFound(msg) => (404, msg.as_str()),
        };

        let body = handlers::ErrorBody {
            error: message.to_string(),
        };
        let json = serde_json::to_vec(&body).unwrap_or_else(|e| {
            format!("{{\"error\":\"Failed to serialize error: {}\"}}", e).into_bytes()
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(json))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(500)
                    .body(Bytes::from("Internal Server Error"))
                    .expect("Failed to build fallback error response")
            })
    }
}
