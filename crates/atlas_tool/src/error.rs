/// Why a tool invocation did not produce a payload.
///
/// The [`Display`](std::fmt::Display) output is what the orchestrator sees,
/// so messages name the unresolved query or the upstream status, and never
/// credentials or request URLs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    /// A required secret is absent from the process configuration.
    #[error("{variable} is not configured in environment variables")]
    Configuration { variable: String },

    /// Neither a name nor a complete coordinate pair was supplied.
    #[error("Please provide either a {subject} or both latitude and longitude coordinates.")]
    MissingInput { subject: &'static str },

    /// The geocoder had no answer for `query`.
    #[error("{message}")]
    GeocodingFailed { query: String, message: String },

    /// A downstream service failed, with its HTTP status when known.
    #[error("{service} API error{}. Please try again later.", status_suffix(.status.as_ref()))]
    UpstreamService {
        service: &'static str,
        status: Option<u16>,
    },

    /// The arguments did not match the tool's input schema.
    #[error("Invalid input for {tool}: {reason}")]
    InvalidInput { tool: String, reason: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The tool's output could not be encoded as JSON.
    #[error("Failed to encode output of {tool}: {reason}")]
    Output { tool: String, reason: String },
}

impl ToolError {
    pub(crate) fn invalid_input(tool: &str, reason: impl ToString) -> Self {
        Self::InvalidInput {
            tool: tool.to_owned(),
            reason: reason.to_string(),
        }
    }
}

fn status_suffix(status: Option<&u16>) -> String {
    status.map(|v| format!(": {v}")).unwrap_or_default()
}
