//! Request parameter extractor
//!
//! Endpoints read their scalar inputs from the query string, overridden by a
//! form-urlencoded, multipart or JSON object body. All values reach the handler as
//! strings so that shape errors come from the service input checks rather
//! than from a framework rejection.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Query, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::envelope::ApiError;
use crate::error::AppError;

/// Merged query + body parameters deserialized into `T`
#[derive(Debug, Clone, Default)]
pub struct Params<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut fields = Map::new();

        if req.uri().query().is_some() {
            let Query(query) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
                .map_err(|e| invalid(format!("invalid query string: {}", e)))?;
            for (key, value) in query {
                fields.insert(key, Value::String(value));
            }
        }

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| invalid(format!("invalid JSON body: {}", e.body_text())))?;
            merge_json(&mut fields, body)?;
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| invalid(format!("invalid form body: {}", e.body_text())))?;
            for (key, value) in body {
                fields.insert(key, Value::String(value));
            }
        } else if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| invalid(format!("invalid multipart body: {}", e.body_text())))?;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| invalid(format!("invalid multipart body: {}", e.body_text())))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let value = field
                    .text()
                    .await
                    .map_err(|e| invalid(format!("invalid multipart field {}: {}", name, e.body_text())))?;
                fields.insert(name, Value::String(value));
            }
        } else if !content_type.is_empty() {
            return Err(invalid(format!("unsupported content type {}", content_type)));
        }

        serde_json::from_value(Value::Object(fields))
            .map(Params)
            .map_err(|e| invalid(format!("invalid parameters: {}", e)))
    }
}

fn invalid(message: String) -> ApiError {
    AppError::InvalidFormat(message).into()
}

/// Copy the scalar members of a JSON object as strings; `null` members are skipped
fn merge_json(fields: &mut Map<String, Value>, body: Value) -> Result<(), ApiError> {
    let object = match body {
        Value::Object(object) => object,
        Value::Null => return Ok(()),
        _ => return Err(invalid("JSON body must be an object".to_string())),
    };
    for (key, value) in object {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(invalid(format!("{} must be a scalar value", key)))
            }
        };
        fields.insert(key, Value::String(text));
    }
    Ok(())
}
