use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolError;

/// The result of a tool call, as handed back to the orchestrator.
///
/// Serializes as the payload object itself on success, or as
/// `{"error": "<message>"}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResult {
    Error { error: String },
    Ok(Value),
}

impl ToolResult {
    #[must_use]
    pub fn error(error: &ToolError) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Ok(value) => value,
            Self::Error { error } => serde_json::json!({ "error": error }),
        }
    }
}

impl From<Result<Value, ToolError>> for ToolResult {
    fn from(result: Result<Value, ToolError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::error(&error),
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
