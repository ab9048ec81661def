//! HTTP layer for the local development server
//!
//! Turns plain HTTP requests into proxy-integration events and the handler's
//! response back into HTTP. The handler itself knows nothing about HTTP.

pub mod endpoint;
pub mod proxy;
pub mod response;

// Re-export main entry point
pub use endpoint::handle_request;
