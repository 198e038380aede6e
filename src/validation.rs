use std::fmt::Display;

use actix_web::{error::PathError, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use serde_path_to_error::{Path, Segment};
use validator::{Validate, ValidationErrors};

// One entry of a 422 response
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ValidationErrorItem{
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String
}

impl ValidationErrorItem {
    pub fn new(loc: Vec<String>, msg: impl Into<String>, kind: impl Into<String>) -> Self{
        ValidationErrorItem{
            loc,
            msg: msg.into(),
            kind: kind.into()
        }
    }
}

/// Request did not match the declared shape.
///
/// Rendered as `422 {"detail": [...], "body": <raw body>}` with one entry per
/// problem found, so a body missing two required fields reports both.
#[derive(Debug)]
pub struct RequestValidationError{
    pub detail: Vec<ValidationErrorItem>,
    pub body: Value
}

#[derive(Serialize)]
struct ValidationErrorBody<'a>{
    detail: &'a [ValidationErrorItem],
    body: &'a Value
}

impl RequestValidationError {
    pub fn from_validation_errors(location: &str, errors: &ValidationErrors, body: Value) -> Self{
        let mut detail: Vec<ValidationErrorItem> = errors.field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = field.to_string();
                field_errors.iter().map(move |error| {
                    let msg = match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("Field failed `{}` validation", error.code)
                    };

                    ValidationErrorItem::new(
                        vec![location.to_string(), field.clone()],
                        msg,
                        error.code.to_string()
                    )
                })
            })
            .collect();

        // field_errors() is a HashMap, keep the output stable
        detail.sort_by(|a, b| a.loc.cmp(&b.loc));

        RequestValidationError{ detail, body }
    }

    pub fn from_deserialize_error(location: &str, error: impl Display, body: Value) -> Self{
        RequestValidationError{
            detail: vec![ValidationErrorItem::new(
                vec![location.to_string()],
                error.to_string(),
                "value_error"
            )],
            body
        }
    }
}

impl Display for RequestValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Request validation failed with {} error(s)", self.detail.len())
    }
}

impl std::error::Error for RequestValidationError {}

impl ResponseError for RequestValidationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code()).json(ValidationErrorBody{
            detail: &self.detail,
            body: &self.body
        })
    }
}

// Raw body echoed back in the 422 response
fn raw_body(bytes: &[u8]) -> Value{
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

// Location of a field inside the request, e.g. ["body", "appearances", "0"]
fn field_location(location: &str, path: &Path) -> Vec<String>{
    std::iter::once(location.to_string())
        .chain(path.iter().filter_map(|segment| match segment {
            Segment::Map { key } => Some(key.clone()),
            Segment::Seq { index } => Some(index.to_string()),
            Segment::Enum { variant } => Some(variant.clone()),
            Segment::Unknown => None
        }))
        .collect()
}

fn top_level_key(path: &Path) -> Option<String>{
    match path.iter().next() {
        Some(Segment::Map { key }) => Some(key.clone()),
        _ => None
    }
}

/// Deserializes `body` into `T`, collecting one error per wrong-typed field.
///
/// Each offending key is dropped and deserialization retried, so the
/// remaining fields still get checked. Forms keep their fields optional,
/// which lets the retry succeed once every bad key is gone.
pub fn deserialize_fields<T>(location: &str, body: &Value) -> (Option<T>, Vec<ValidationErrorItem>)
where
    T: DeserializeOwned
{
    let mut candidate = body.clone();
    let mut errors = Vec::new();

    loop {
        match serde_path_to_error::deserialize::<_, T>(&candidate) {
            Ok(value) => return (Some(value), errors),
            Err(e) => {
                errors.push(ValidationErrorItem::new(
                    field_location(location, e.path()),
                    e.inner().to_string(),
                    "type_error"
                ));

                let removed = match (top_level_key(e.path()), candidate.as_object_mut()) {
                    (Some(key), Some(map)) => map.remove(&key).is_some(),
                    _ => false
                };

                if !removed {
                    return (None, errors);
                }
            }
        }
    }
}

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// An empty body is read as `{}`, so forms whose fields all have defaults
/// accept it.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T> FromRequest for ValidJson<T>
where
    T: DeserializeOwned + Validate + 'static
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut actix_web::dev::Payload) -> Self::Future {
        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = bytes.await?;

            let (body, echoed) = if bytes.iter().all(u8::is_ascii_whitespace) {
                (Value::Object(Default::default()), Value::Null)
            } else {
                let body: Value = serde_json::from_slice(&bytes)
                    .map_err(|e| RequestValidationError{
                        detail: vec![ValidationErrorItem::new(vec!["body".to_string()], e.to_string(), "json_invalid")],
                        body: raw_body(&bytes)
                    })?;
                (body.clone(), body)
            };

            let (value, mut detail) = deserialize_fields::<T>("body", &body);

            if let Some(value) = &value {
                if let Err(e) = value.validate() {
                    // a wrong-typed field was dropped before validating, it is already reported
                    let missing = RequestValidationError::from_validation_errors("body", &e, Value::Null).detail;
                    let reported: Vec<Vec<String>> = detail.iter().map(|item| item.loc.clone()).collect();
                    detail.extend(missing.into_iter().filter(|item| !reported.contains(&item.loc)));
                }
            }

            match value {
                Some(value) if detail.is_empty() => Ok(ValidJson(value)),
                _ => {
                    detail.sort_by(|a, b| a.loc.cmp(&b.loc));
                    Err(RequestValidationError{ detail, body: echoed }.into())
                }
            }
        })
    }
}

/// Query string extractor with the same 422 behaviour as [`ValidJson`].
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<T> FromRequest for ValidQuery<T>
where
    T: DeserializeOwned + Validate
{
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let result = web::Query::<T>::from_query(req.query_string())
            .map_err(|e| RequestValidationError::from_deserialize_error("query", e, Value::Null))
            .and_then(|query| {
                query.0.validate()
                    .map_err(|e| RequestValidationError::from_validation_errors("query", &e, Value::Null))?;
                Ok(ValidQuery(query.0))
            })
            .map_err(actix_web::Error::from);

        ready(result)
    }
}

// Malformed path segments (e.g. a non integer id) are shape errors too
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error{
    RequestValidationError{
        detail: vec![ValidationErrorItem::new(vec!["path".to_string()], err.to_string(), "type_error")],
        body: Value::Null
    }
    .into()
}
