//! HTTP collaborators for tests.
//!
//! Every provider client takes a base URL, so tests point it at a local
//! [`MockServer`] and assert on hit counts afterwards.

pub use httpmock::{Method::GET, Mock, MockServer};

/// Register a mock that matches any request and answers with an error.
///
/// Asserting zero hits on it proves no outbound request was made.
pub async fn catch_all(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|_when, then| {
            then.status(599).body("unexpected request");
        })
        .await
}
