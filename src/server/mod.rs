// Local server module entry point
// Accept loop, per-connection service and graceful shutdown for development use

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is renamed
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crate::config::Config;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

/// Shared state for every connection of the local server
pub struct AppState {
    pub config: Config,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            active_connections: AtomicUsize::new(0),
        }
    }
}

/// Bind, serve until SIGINT/SIGTERM, then stop accepting
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;
    crate::logger::log_server_start(&addr, &config);

    let state = Arc::new(AppState::new(config));
    let signals = Arc::new(signal::SignalHandler::new());
    signal::start_signal_handler(Arc::clone(&signals));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(start_server_loop(listener, state, signals))
        .await
}
