use std::sync::Mutex;

use tracing::{Subscriber, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_LOG_FILTER: &str = "template_core=info,runner_lambda=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    log_subscriber(filter, std::io::stdout).init();
}

/// Plain-text subscriber: each line is the bare message.
///
/// CloudWatch stamps time itself and does not render ANSI colours, so time,
/// level, target and colour are all left out.
pub fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_level(false)
            .with_target(false)
            .without_time(),
    )
}

/// Destination for the handler's log lines.
pub trait LogSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Emits every line as one `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, line: &str) {
        info!("{}", line);
    }
}

/// Keeps lines in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn emit(&self, line: &str) {
        (**self).emit(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateConfig;
    use crate::handler::Handler;
    use crate::invocation::{InvocationContext, InvocationEvent};
    use serde_json::json;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let writer = CaptureWriter::default();
        let make_writer = {
            let writer = writer.clone();
            move || writer.clone()
        };
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER), make_writer);
        tracing::subscriber::with_default(subscriber, f);
        writer.contents()
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.emit("first");
        sink.emit("second");
        assert_eq!(sink.lines(), vec!["first", "second"]);

        sink.clear();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_sink_through_reference() {
        let sink = MemorySink::new();
        let by_ref: &MemorySink = &sink;
        LogSink::emit(&by_ref, "line");
        assert_eq!(sink.lines(), vec!["line"]);
    }

    #[test]
    fn test_tracing_sink_writes_bare_message() {
        let out = capture(|| TracingSink.emit("Event: {}"));
        assert_eq!(out, "Event: {}\n");
    }

    #[test]
    fn test_handler_lines_are_plain_text() {
        let handler = Handler::new(&TemplateConfig::default()).unwrap();
        let event = InvocationEvent::from(json!({"path": "/test"}));

        let out = capture(|| {
            handler.handle(&event, &InvocationContext::default()).unwrap();
        });

        assert!(out.starts_with("Event: {\n  \"path\": \"/test\"\n}\n"));
        assert!(out.contains("\nContext: {\n  \"functionName\": \"\","));
        assert!(!out.contains('\u{1b}'));
        assert!(!out.contains("INFO"));
    }

    #[test]
    fn test_default_filter_drops_debug() {
        let out = capture(|| tracing::debug!(target: "template_core::telemetry", "hidden"));
        assert!(out.is_empty());
    }
}
