use std::process::ExitCode;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    match pullit::start_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server stopped: {e}");
            eprintln!("Server stopped: {e}");

            ExitCode::FAILURE
        }
    }
}
