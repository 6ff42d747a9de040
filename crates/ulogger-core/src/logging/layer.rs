//! Tracing Layer that routes `tracing` events into a [`Logger`].
//!
//! Lets an application that already uses `tracing` macros have those events
//! written in the same file, with the same format, as its instrumented
//! functions.

use std::fmt::Write as FmtWrite;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::level::Level;
use super::logger::Logger;

/// Events from this crate are never routed back into a logger; a failing
/// sink reports through `tracing` and would otherwise feed itself.
const OWN_TARGET_PREFIX: &str = "ulogger_core";

/// A tracing Layer that forwards events to a [`Logger`].
///
/// Structured fields are appended to the message as `key=value` pairs and
/// the enclosing span names, if any, are prefixed as `root > leaf: `.
pub struct LoggerLayer {
    logger: Logger,
}

impl LoggerLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// The logger receiving events.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(OWN_TARGET_PREFIX) {
            return;
        }

        let level = Level::from_tracing(metadata.level());
        if !self.logger.is_enabled_for(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut message = String::new();
        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                let _ = write!(message, "{}: ", spans.join(" > "));
            }
        }
        message.push_str(visitor.message.as_deref().unwrap_or_default());
        for (name, value) in &visitor.fields {
            let _ = write!(message, " {}={}", name, value);
        }

        self.logger.log(level, message);
    }
}

/// Collects the `message` field and any other fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.fields.push((field.name(), buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }
}
