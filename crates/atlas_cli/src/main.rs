use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    atlas_cli::run().await
}
