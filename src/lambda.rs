// Lambda runtime surface
// Bridges the runtime API loop to the handler entry point

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use crate::config::Config;
use crate::event::InvocationContext;
use crate::handler;
use crate::logger;
use crate::response::AnalysisResponse;

/// Serve invocations until the runtime API goes away
pub async fn run(config: &Config) -> Result<(), Error> {
    logger::log_lambda_start(config);
    lambda_runtime::run(service_fn(invoke)).await
}

/// One invocation; failures are already folded into the response
#[allow(clippy::unused_async)]
pub async fn invoke(event: LambdaEvent<Value>) -> Result<AnalysisResponse, Error> {
    let (payload, context) = event.into_parts();
    let ctx = InvocationContext::from(&context);
    Ok(handler::handle_event(payload, &ctx))
}
