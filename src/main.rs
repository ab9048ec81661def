mod config;
mod error;
mod event;
mod handler;
mod http;
mod lambda;
mod logger;
mod response;
mod server;

use config::RunMode;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg.logging)?;

    // Create Tokio runtime, sized by runtime.workers when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.runtime.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    match cfg.resolved_mode() {
        RunMode::Lambda => runtime
            .block_on(lambda::run(&cfg))
            .map_err(|e| e as Box<dyn std::error::Error>),
        RunMode::Local | RunMode::Auto => runtime.block_on(server::run(cfg)),
    }
}
