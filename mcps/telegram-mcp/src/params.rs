//! Parameter types for Telegram MCP tools
//!
//! Arguments arrive as a loose JSON object. Each tool parses them here into a
//! typed parameter struct before anything touches the upstream; every schema
//! violation becomes an [`ArgumentError`].

use serde_json::{Map, Value};

use crate::types::ArgumentError;

/// Argument mapping of a single invocation
pub type Arguments = Map<String, Value>;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMessagesParams {
    /// Trimmed, never empty
    pub source: String,
    /// Within `MIN_LIMIT..=MAX_LIMIT`
    pub limit: usize,
}

impl ReadMessagesParams {
    pub fn new(source: &str, limit: i64) -> Result<Self, ArgumentError> {
        let source = non_empty_source(source)?;
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(ArgumentError::OutOfRange {
                field: "limit",
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            });
        }
        let limit = usize::try_from(limit).map_err(|_| ArgumentError::NotAnInteger("limit"))?;
        Ok(Self { source, limit })
    }

    pub fn from_arguments(args: &Arguments) -> Result<Self, ArgumentError> {
        reject_unexpected(args, &["source", "limit"])?;
        let source = required_string(args, "source")?;
        let limit = match args.get("limit") {
            None => DEFAULT_LIMIT,
            Some(value) => coerce_integer("limit", value)?,
        };
        Self::new(source, limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointParams {
    /// Trimmed, never empty
    pub source: String,
}

impl CheckpointParams {
    pub fn from_arguments(args: &Arguments) -> Result<Self, ArgumentError> {
        reject_unexpected(args, &["source"])?;
        let source = non_empty_source(required_string(args, "source")?)?;
        Ok(Self { source })
    }
}

/// list_sources takes no arguments at all
pub fn expect_no_arguments(args: &Arguments) -> Result<(), ArgumentError> {
    reject_unexpected(args, &[])
}

fn reject_unexpected(args: &Arguments, allowed: &[&str]) -> Result<(), ArgumentError> {
    match args.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ArgumentError::Unexpected(key.clone())),
        None => Ok(()),
    }
}

fn required_string<'a>(args: &'a Arguments, field: &'static str) -> Result<&'a str, ArgumentError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ArgumentError::Missing(field)),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ArgumentError::NotAString(field)),
    }
}

fn non_empty_source(source: &str) -> Result<String, ArgumentError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(ArgumentError::Missing("source"));
    }
    Ok(trimmed.to_string())
}

/// Accept JSON integers, and floats with no fractional part
fn coerce_integer(field: &'static str, value: &Value) -> Result<i64, ArgumentError> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                Some(float) if float.is_finite() && float.fract() == 0.0 => Ok(float as i64),
                _ => Err(ArgumentError::NotAnInteger(field)),
            }
        }
        _ => Err(ArgumentError::NotAnInteger(field)),
    }
}
