use super::types::{ExecContext, LogValue, Logger, Op, Span, Tracer};
use crate::error::DriverError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A tracer whose spans record nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn get_span(&self, _ctx: &ExecContext) -> Box<dyn Span> {
        Box::new(NullSpan)
    }
}

/// A span that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpan;

impl Span for NullSpan {
    fn new_child(&self, _op: Op) -> Box<dyn Span> {
        Box::new(NullSpan)
    }

    fn set_label(&self, _key: &str, _value: &str) {}

    fn set_error(&self, _err: &DriverError) {}

    fn finish(self: Box<Self>) {}
}

/// A logger that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _ctx: &ExecContext, _op: Op, _fields: &[(&str, LogValue<'_>)]) {}
}

/// Adapts a closure into a [`Logger`].
///
/// ```rust,ignore
/// let logger = FnLogger::new(|_ctx, op, fields| {
///     let line: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
///     eprintln!("[{op}] {}", line.join(" "));
/// });
/// ```
#[derive(Clone)]
pub struct FnLogger<F>(F);

impl<F> FnLogger<F>
where
    F: Fn(&ExecContext, Op, &[(&str, LogValue<'_>)]) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Logger for FnLogger<F>
where
    F: Fn(&ExecContext, Op, &[(&str, LogValue<'_>)]) + Send + Sync,
{
    fn log(&self, ctx: &ExecContext, op: Op, fields: &[(&str, LogValue<'_>)]) {
        (self.0)(ctx, op, fields)
    }
}

/// A logger that aggregates row-advance records into counters.
///
/// Records for operations other than [`Op::RowsNext`] are ignored.
#[derive(Debug, Default)]
pub struct StatsLogger {
    calls: AtomicU64,
    rows: AtomicU64,
    end_of_rows: AtomicU64,
    failed: AtomicU64,
    total_duration_nanos: AtomicU64,
    max_duration_nanos: AtomicU64,
    slowest_tag: Mutex<Option<String>>,
}

/// Snapshot of [`StatsLogger`] counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStats {
    /// Total number of advance calls observed.
    pub calls: u64,
    /// Calls that produced a row.
    pub rows: u64,
    /// Calls that reported the end of the result set.
    pub end_of_rows: u64,
    /// Calls that failed with a genuine error.
    pub failed: u64,
    /// Total time spent in advance calls.
    pub total_duration: Duration,
    /// Slowest single advance call.
    pub max_duration: Duration,
    /// Tag of the context that saw the slowest call.
    pub slowest_tag: Option<String>,
}

impl StatsLogger {
    /// Create a new stats logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current statistics.
    pub fn stats(&self) -> RowStats {
        RowStats {
            calls: self.calls.load(Ordering::Relaxed),
            rows: self.rows.load(Ordering::Relaxed),
            end_of_rows: self.end_of_rows.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            total_duration: Duration::from_nanos(self.total_duration_nanos.load(Ordering::Relaxed)),
            max_duration: Duration::from_nanos(self.max_duration_nanos.load(Ordering::Relaxed)),
            slowest_tag: self
                .slowest_tag
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    /// Reset all statistics.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.rows.store(0, Ordering::Relaxed);
        self.end_of_rows.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.total_duration_nanos.store(0, Ordering::Relaxed);
        self.max_duration_nanos.store(0, Ordering::Relaxed);
        *self
            .slowest_tag
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Logger for StatsLogger {
    fn log(&self, ctx: &ExecContext, op: Op, fields: &[(&str, LogValue<'_>)]) {
        if op != Op::RowsNext {
            return;
        }

        self.calls.fetch_add(1, Ordering::Relaxed);

        for (key, value) in fields {
            match (*key, value) {
                ("err", LogValue::Err(None)) => {
                    self.rows.fetch_add(1, Ordering::Relaxed);
                }
                ("err", LogValue::Err(Some(e))) if e.is_no_more_rows() => {
                    self.end_of_rows.fetch_add(1, Ordering::Relaxed);
                }
                ("err", LogValue::Err(Some(_))) => {
                    self.failed.fetch_add(1, Ordering::Relaxed);
                }
                ("duration", LogValue::Duration(d)) => self.record_duration(ctx, *d),
                _ => {}
            }
        }
    }
}

impl StatsLogger {
    fn record_duration(&self, ctx: &ExecContext, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        let prev = self.total_duration_nanos.fetch_add(nanos, Ordering::Relaxed);
        if prev.checked_add(nanos).is_none() {
            self.total_duration_nanos.store(u64::MAX, Ordering::Relaxed);
        }

        let mut current_max = self.max_duration_nanos.load(Ordering::Relaxed);
        while nanos > current_max {
            match self.max_duration_nanos.compare_exchange_weak(
                current_max,
                nanos,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    *self
                        .slowest_tag
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner) = ctx.tag.clone();
                    break;
                }
                Err(updated) => current_max = updated,
            }
        }
    }
}

/// A composite logger that delegates to multiple loggers, in insertion order.
pub struct CompositeLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl CompositeLogger {
    /// Create an empty composite logger.
    pub fn new() -> Self {
        Self {
            loggers: Vec::new(),
        }
    }

    /// Add a logger.
    #[allow(clippy::should_implement_trait)]
    pub fn add<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Arc::new(logger));
        self
    }

    /// Add an Arc-wrapped logger.
    pub fn add_arc(mut self, logger: Arc<dyn Logger>) -> Self {
        self.loggers.push(logger);
        self
    }
}

impl Default for CompositeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for CompositeLogger {
    fn log(&self, ctx: &ExecContext, op: Op, fields: &[(&str, LogValue<'_>)]) {
        for logger in &self.loggers {
            logger.log(ctx, op, fields);
        }
    }
}
