// Invocation context
// Identifies one invocation for log correlation; never affects the response

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static LOCAL_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub invoked_function_arn: Option<String>,
    /// Deadline in milliseconds since the Unix epoch
    pub deadline_ms: Option<u64>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            invoked_function_arn: None,
            deadline_ms: None,
        }
    }

    /// Context for a request served by the local development server
    pub fn local() -> Self {
        let seq = LOCAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("local-{}-{seq}", Utc::now().timestamp_millis()))
    }
}

impl From<&lambda_runtime::Context> for InvocationContext {
    fn from(ctx: &lambda_runtime::Context) -> Self {
        Self {
            request_id: ctx.request_id.clone(),
            invoked_function_arn: Some(ctx.invoked_function_arn.clone())
                .filter(|arn| !arn.is_empty()),
            deadline_ms: Some(ctx.deadline).filter(|d| *d > 0),
        }
    }
}
