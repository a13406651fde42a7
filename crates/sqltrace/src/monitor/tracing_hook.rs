use super::types::{ExecContext, LogValue, Logger, Op, Span, Tracer};
use crate::error::DriverError;
use tracing::Level;
use tracing::field::Empty;

/// A [`Tracer`] backed by `tracing` spans.
///
/// Instrumented calls become children of the span that is current on the
/// calling thread when the call is made.
///
/// Enable via the crate feature: `sqltrace = { features = ["tracing"] }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracer;

impl TracingTracer {
    pub fn new() -> Self {
        Self
    }
}

impl Tracer for TracingTracer {
    fn get_span(&self, _ctx: &ExecContext) -> Box<dyn Span> {
        Box::new(TracingSpan {
            span: tracing::Span::current(),
        })
    }
}

/// A `tracing::Span` handle.
///
/// Only the `component` label is recorded as a span field; other labels are
/// emitted as `trace` events inside the span.
#[derive(Debug, Clone)]
pub struct TracingSpan {
    span: tracing::Span,
}

impl TracingSpan {
    /// Wrap an existing `tracing` span.
    pub fn new(span: tracing::Span) -> Self {
        Self { span }
    }

    pub fn inner(&self) -> &tracing::Span {
        &self.span
    }
}

impl Span for TracingSpan {
    fn new_child(&self, op: Op) -> Box<dyn Span> {
        let span = tracing::info_span!(
            target: "sqltrace.rows",
            parent: &self.span,
            "sql",
            otel.name = op.as_str(),
            component = Empty,
            otel.status_code = Empty,
            error = Empty,
        );
        Box::new(TracingSpan { span })
    }

    fn set_label(&self, key: &str, value: &str) {
        if key == "component" {
            self.span.record("component", value);
        } else {
            tracing::trace!(target: "sqltrace.rows", parent: &self.span, label = key, value);
        }
    }

    fn set_error(&self, err: &DriverError) {
        self.span.record("otel.status_code", "ERROR");
        self.span.record("error", tracing::field::display(err));
    }

    fn finish(self: Box<Self>) {}
}

/// A [`Logger`] that emits each record as a `tracing` event.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    /// Tracing event level to emit at.
    pub level: Level,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
        }
    }
}

impl TracingLogger {
    /// Create a new logger with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Logger for TracingLogger {
    fn log(&self, ctx: &ExecContext, op: Op, fields: &[(&str, LogValue<'_>)]) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let tag = ctx.tag.as_deref().unwrap_or("-");
        let record = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        let ctx_fields = tracing::field::debug(&ctx.fields);
        match ctx.remaining() {
            Some(remaining) => emit_at_level!(
                self.level,
                target: "sqltrace.rows",
                op = op.as_str(),
                tag,
                remaining = ?remaining,
                fields = ctx_fields,
                "{record}"
            ),
            None => emit_at_level!(
                self.level,
                target: "sqltrace.rows",
                op = op.as_str(),
                tag,
                fields = ctx_fields,
                "{record}"
            ),
        }
    }
}
