pub mod config;
pub mod errors;
pub mod handler;
pub mod invocation;
pub mod response;
pub mod runtime;
pub mod telemetry;

pub use config::TemplateConfig;
pub use errors::{Result, TemplateError};
pub use handler::Handler;
pub use invocation::{InvocationContext, InvocationEvent};
pub use response::Response;
pub use runtime::Runtime;
