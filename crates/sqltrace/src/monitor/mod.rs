//! Tracing and logging around driver row cursors.
//!
//! This module provides:
//! - [`InstrumentedRows`], a drop-in [`Rows`](crate::Rows) wrapper that opens a
//!   child span and emits a log record around every row advance
//! - The backend seams it reports to ([`Tracer`], [`Span`], [`Logger`])
//! - Ready-made backends: no-op, closure, statistics, composite, and
//!   (with the `tracing` feature) `tracing`-based
//!
//! # Example
//!
//! ```rust,ignore
//! use sqltrace::monitor::{ExecContext, InstrumentedRows, Options, StatsLogger, TracingTracer};
//! use std::sync::Arc;
//!
//! let stats = Arc::new(StatsLogger::new());
//! let opts = Options::new()
//!     .with_tracer(TracingTracer::new())
//!     .with_logger_arc(stats.clone());
//!
//! let mut rows = InstrumentedRows::new(ExecContext::new().with_tag("orders"), opts, driver_rows);
//! let mut dest = vec![Value::Null; rows.columns().len()];
//! while rows.next(&mut dest).is_ok() {
//!     // ...
//! }
//! println!("{:?}", stats.stats());
//! ```

mod config;
mod monitors;
mod rows;
mod types;

#[cfg(feature = "tracing")]
mod tracing_hook;


pub use config::{DEFAULT_COMPONENT, Options, OptionsFile};
pub use monitors::{CompositeLogger, FnLogger, NullLogger, NullSpan, NullTracer, RowStats, StatsLogger};
pub use rows::InstrumentedRows;
pub use types::{ExecContext, LogValue, Logger, Op, Span, Tracer};

#[cfg(feature = "tracing")]
pub use tracing_hook::{TracingLogger, TracingSpan, TracingTracer};
