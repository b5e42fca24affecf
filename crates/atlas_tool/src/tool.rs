use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{ToolError, ToolResult};

/// Checks an input beyond what its type already enforces.
pub trait Validate {
    /// Return a human-readable reason when the input is out of bounds.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// A typed tool the orchestrator can call.
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    type Input: DeserializeOwned + JsonSchema + Validate + Send;
    type Output: Serialize + Send;

    /// The name the orchestrator calls the tool by.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, ToolError>;
}

/// What the orchestrator needs to know to offer a tool to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,

    /// JSON schema of the tool's input.
    pub parameters: Value,
}

/// Type-erased [`Tool`].
#[async_trait]
trait DynTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn definition(&self) -> ToolDefinition;

    async fn execute_dyn(&self, input: Value) -> Result<Value, ToolError>;
}

#[async_trait]
impl<T: Tool> DynTool for T {
    fn name(&self) -> &'static str {
        Tool::name(self)
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Tool::name(self),
            description: self.description(),
            parameters: schemars::schema_for!(T::Input).to_value(),
        }
    }

    async fn execute_dyn(&self, input: Value) -> Result<Value, ToolError> {
        let name = Tool::name(self);
        let input: T::Input =
            serde_json::from_value(input).map_err(|error| ToolError::invalid_input(name, error))?;
        input
            .validate()
            .map_err(|reason| ToolError::invalid_input(name, reason))?;

        let output = self.execute(input).await?;
        serde_json::to_value(output).map_err(|error| ToolError::Output {
            tool: name.to_owned(),
            reason: error.to_string(),
        })
    }
}

/// The set of tools offered to the orchestrator.
#[derive(Default)]
pub struct Tools {
    tools: Vec<Box<dyn DynTool>>,
}

impl std::fmt::Debug for Tools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name()))
            .finish()
    }
}

impl Tools {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool registered under an existing name replaces it.
    pub fn register(&mut self, tool: impl Tool) {
        let name = Tool::name(&tool);
        self.tools.retain(|t| t.name() != name);
        self.tools.push(Box::new(tool));
    }

    #[must_use]
    pub fn with(mut self, tool: impl Tool) -> Self {
        self.register(tool);
        self
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    #[must_use]
    pub fn defs(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Run the tool called `name`, keeping the failure typed.
    pub async fn call(&self, name: &str, input: Value) -> Result<Value, ToolError> {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            return Err(ToolError::UnknownTool(name.to_owned()));
        };

        debug!(tool = name, "Executing tool.");
        tool.execute_dyn(input).await
    }

    /// Run the tool called `name` and return exactly one result, which is
    /// either the payload or an `{"error"}` object.
    pub async fn execute(&self, name: &str, input: Value) -> ToolResult {
        let result = self.call(name, input).await;
        match &result {
            Ok(_) => info!(tool = name, "Tool call succeeded."),
            Err(error) => warn!(tool = name, %error, "Tool call failed."),
        }

        result.into()
    }
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
