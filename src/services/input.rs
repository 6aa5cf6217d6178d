//! Request input shape checks
//!
//! Every endpoint receives its parameters as optional strings; these helpers
//! turn them into typed values or into the matching error.

use crate::{
    error::{AppError, AppResult},
    models::{equipment::Page, status::Status},
};

/// A required, non-blank text field
pub fn require_text<'a>(field: &str, value: Option<&'a str>) -> AppResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingField(format!("missing {}", field))),
    }
}

/// An optional text field; blank counts as absent
pub fn optional_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a positive integer id
pub fn parse_id(field: &str, raw: &str) -> AppResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidNumber(format!(
            "{} is not a positive number",
            field
        ))),
    }
}

/// A required positive integer id
pub fn require_id(field: &str, value: Option<&str>) -> AppResult<i32> {
    let raw = require_text(field, value)?;
    parse_id(field, raw)
}

/// Both `limit` and `offset` are required; `limit >= 1`, `offset >= 0`
pub fn require_page(limit: Option<&str>, offset: Option<&str>) -> AppResult<Page> {
    let limit_raw = require_text("limit", limit)?;
    let offset_raw = require_text("offset", offset)?;

    let limit = match limit_raw.trim().parse::<i64>() {
        Ok(v) if v >= 1 => v,
        _ => {
            return Err(AppError::InvalidNumber(
                "limit must be a positive number".to_string(),
            ))
        }
    };
    let offset = match offset_raw.trim().parse::<i64>() {
        Ok(v) if v >= 0 => v,
        _ => {
            return Err(AppError::InvalidNumber(
                "offset must be zero or a positive number".to_string(),
            ))
        }
    };
    Ok(Page { limit, offset })
}

/// Optional boolean flag (`true`/`false`/`1`/`0`), absent means false
pub fn parse_flag(field: &str, value: Option<&str>) -> AppResult<bool> {
    match optional_text(value).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) if v == "true" || v == "1" => Ok(true),
        Some(v) if v == "false" || v == "0" => Ok(false),
        Some(_) => Err(AppError::InvalidFormat(format!(
            "{} must be true or false",
            field
        ))),
    }
}

/// A required status value
pub fn require_status(value: Option<&str>) -> AppResult<Status> {
    require_text("status", value)?.parse()
}
