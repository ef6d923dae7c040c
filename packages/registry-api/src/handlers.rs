//! HTTP endpoint implementations for the student collection.

use http_body_util::BodyExt;
use hyper::{body::Bytes, Request, Response};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tokio::time;

use crate::router::{AppState, RouterError};
use registry_core::{StoreError, Student};

/// Type alias for matchit parameters with explicit lifetimes
type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Failure description
    pub error: String,
}

/// Confirmation payload for deletions.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    /// Confirmation text
    pub message: String,
}

/// Helper to build a JSON HTTP response with proper error handling
fn build_json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(data)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build a plain-text HTTP response
fn build_text_response(status: u16, text: &'static str) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Bytes::from(text))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper function to read request body with timeout
async fn read_request_body_with_timeout(
    req: Request<hyper::body::Incoming>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Decode the `{id}` path parameter.
fn decode_id_param(params: &MatchitParams<'_, '_>) -> Result<String, RouterError> {
    let raw = params
        .get("id")
        .ok_or_else(|| RouterError::BadRequest("Missing id path parameter".to_string()))?;
    Ok(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// Parse a request body into a student record.
fn parse_student(body: &[u8]) -> Result<Student, RouterError> {
    serde_json::from_slice(body)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Map StoreError to appropriate RouterError
fn map_store_error(e: StoreError) -> RouterError {
    match e {
        StoreError::StudentNotFound { .. } => {
            RouterError::NotFound("Student not found".to_string())
        }
        StoreError::LockPoisoned => RouterError::InternalError(format!("Store error: {}", e)),
    }
}

/// Returns a fixed greeting.
///
/// # Endpoint
/// `GET /hello`
///
/// # Response
/// - **200 OK**: `Hello, world` as plain text
///
/// # Example
/// ```bash
/// curl http://localhost:8080/hello
/// ```
pub async fn hello(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    _state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    build_text_response(200, "Hello, world")
}

/// Creates a new student.
///
/// # Endpoint
/// `POST /students`
///
/// # Request Body
/// ```json
/// {
///   "id": "s1",
///   "name": "Ann",
///   "age": 20,
///   "email": "ann@example.com"
/// }
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored record
/// ```json
/// {
///   "id": "s1",
///   "name": "Ann",
///   "age": 20,
///   "email": "ann@example.com"
/// }
/// ```
///
/// # Errors
/// - **400 Bad Request**: Malformed JSON or a field of the wrong type
/// - **500 Internal Server Error**: Store failure
///
/// # Notes
/// - A record with the same id is silently overwritten
/// - Missing fields decode as `""` / `0`
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/students \
///   -H "Content-Type: application/json" \
///   -d '{"id": "s1", "name": "Ann", "age": 20, "email": "ann@example.com"}'
/// ```
pub async fn create_student(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    // Read and parse request body with timeout
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let student = parse_student(&body_bytes)?;

    tracing::info!("Creating student {}", student.id);
    let displaced = state.store.put(student.clone()).map_err(map_store_error)?;
    if displaced.is_some() {
        tracing::debug!("Student {} already existed and was overwritten", student.id);
    }

    build_json_response(201, &student)
}

/// Lists all students.
///
/// # Endpoint
/// `GET /students`
///
/// # Response
/// - **200 OK**: Returns every stored record, order unspecified
/// ```json
/// [
///   {"id": "s1", "name": "Ann", "age": 20, "email": "ann@example.com"},
///   {"id": "s2", "name": "Ben", "age": 22, "email": "ben@example.com"}
/// ]
/// ```
///
/// # Errors
/// - **500 Internal Server Error**: Store failure
///
/// # Example
/// ```bash
/// curl http://localhost:8080/students
/// ```
pub async fn list_students(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    tracing::debug!("Listing all students");
    let students = state.store.get_all().map_err(map_store_error)?;

    build_json_response(200, &students)
}

/// Fully replaces an existing student.
///
/// # Endpoint
/// `PUT /students/{id}`
///
/// # Request Body
/// ```json
/// {
///   "name": "Anna",
///   "age": 21,
///   "email": "anna@example.com"
/// }
/// ```
///
/// # Response
/// - **200 OK**: Returns the updated record; its `id` is always the
///   path id, regardless of any id in the body
///
/// # Errors
/// - **400 Bad Request**: Malformed JSON or a field of the wrong type
/// - **404 Not Found**: No student with the given id
/// - **500 Internal Server Error**: Store failure
///
/// # Example
/// ```bash
/// curl -X PUT http://localhost:8080/students/s1 \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Anna", "age": 21, "email": "anna@example.com"}'
/// ```
pub async fn update_student(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = decode_id_param(&params)?;

    // Parse before the presence check so a malformed body reports 400
    // even when the id is unknown.
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let student = parse_student(&body_bytes)?;

    tracing::info!("Updating student {}", id);
    let updated = state.store.replace(&id, student).map_err(map_store_error)?;

    build_json_response(200, &updated)
}

/// Deletes a student.
///
/// # Endpoint
/// `DELETE /students/{id}`
///
/// # Response
/// - **200 OK**: Confirmation message
/// ```json
/// {
///   "message": "Student deleted"
/// }
/// ```
///
/// # Errors
/// - **404 Not Found**: No student with the given id
/// - **500 Internal Server Error**: Store failure
///
/// # Example
/// ```bash
/// curl -X DELETE http://localhost:8080/students/s1
/// ```
pub async fn delete_student(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = decode_id_param(&params)?;

    tracing::info!("Deleting student {}", id);
    state.store.remove(&id).map_err(map_store_error)?;

    build_json_response(
        200,
        &MessageBody {
            message: "Student deleted".to_string(),
        },
    )
}
