use tracing::debug;

use crate::config::TemplateConfig;
use crate::errors::{ConfigError, Result, TemplateError};
use crate::invocation::{InvocationContext, InvocationEvent};
use crate::response::{Response, message_body};
use crate::telemetry::{LogSink, TracingSink};

pub const EVENT_LABEL: &str = "Event: ";
pub const CONTEXT_LABEL: &str = "Context: ";

/// The generated project's request handler.
///
/// Logs the event, then the context, and answers every invocation with the same
/// 200 response. The greeting body is rendered once, at construction.
#[derive(Debug)]
pub struct Handler<S: LogSink = TracingSink> {
    body: String,
    sink: S,
}

impl Handler<TracingSink> {
    pub fn new(config: &TemplateConfig) -> Result<Self> {
        Self::with_sink(config, TracingSink)
    }
}

impl<S: LogSink> Handler<S> {
    pub fn with_sink(config: &TemplateConfig, sink: S) -> Result<Self> {
        let config = config.clone().normalized().map_err(|e| {
            TemplateError::Config(ConfigError::ValidationFailed {
                reason: e.to_string(),
            })
        })?;

        let body = message_body(&config.greeting())?;
        debug!("Handler ready, response body: {}", body);

        Ok(Self { body, sink })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handles one invocation and returns its single result.
    pub fn handle(
        &self,
        event: &InvocationEvent,
        context: &InvocationContext,
    ) -> Result<Response> {
        let event_json = serde_json::to_string_pretty(event)?;
        self.sink.emit(&format!("{}{}", EVENT_LABEL, event_json));

        let context_json = serde_json::to_string_pretty(context)?;
        self.sink.emit(&format!("{}{}", CONTEXT_LABEL, context_json));

        Ok(Response::ok(self.body.as_str()))
    }

    /// Callback form of [`Handler::handle`]. `callback` runs exactly once, before
    /// this returns.
    pub fn handle_with_callback<F>(
        &self,
        event: &InvocationEvent,
        context: &InvocationContext,
        callback: F,
    ) where
        F: FnOnce(Result<Response>),
    {
        callback(self.handle(event, context));
    }
}
