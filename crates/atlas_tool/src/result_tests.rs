use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

#[test]
fn payload_serializes_as_itself() {
    let result = ToolResult::Ok(json!({ "latitude": 1.0, "marker": true }));

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "latitude": 1.0, "marker": true })
    );
    assert!(!result.is_error());
}

#[test]
fn error_serializes_as_error_object() {
    let result = ToolResult::from(Err(ToolError::UnknownTool("getTime".to_owned())));

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "error": "Unknown tool: getTime" })
    );
    assert_eq!(result.clone().into_value(), json!({ "error": "Unknown tool: getTime" }));
    assert!(result.is_error());
}

#[test]
fn error_object_deserializes_as_error() {
    let result: ToolResult = serde_json::from_value(json!({ "error": "boom" })).unwrap();

    assert_eq!(result, ToolResult::Error {
        error: "boom".to_owned()
    });
}

#[test]
fn messages() {
    let cases = [
        (
            ToolError::Configuration {
                variable: "NESHAN_API_KEY".to_owned(),
            },
            "NESHAN_API_KEY is not configured in environment variables",
        ),
        (
            ToolError::MissingInput {
                subject: "city name",
            },
            "Please provide either a city name or both latitude and longitude coordinates.",
        ),
        (
            ToolError::UpstreamService {
                service: "Weather",
                status: Some(503),
            },
            "Weather API error: 503. Please try again later.",
        ),
        (
            ToolError::UpstreamService {
                service: "Weather",
                status: None,
            },
            "Weather API error. Please try again later.",
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.to_string(), expected);
    }
}
