// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use super::AppState;
use crate::logger;

/// Accept loop for the local server
///
/// Returns once a shutdown signal arrives. `server::run` then returns and
/// drops its `LocalSet`, which cancels any connection still being served.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = signals.shutdown.notified() => {
                logger::log_shutdown();
                drop(listener);
                return Ok(());
            }
        }
    }
}
