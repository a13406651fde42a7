//! # sqltrace
//!
//! Transparent instrumentation for database driver row cursors.
//!
//! ## Features
//!
//! - **Drop-in**: [`InstrumentedRows`] implements the same [`Rows`] contract,
//!   capability traits included, as the cursor it wraps
//! - **One instrumented primitive**: each row advance gets a child span and a
//!   structured log record (`err`, `duration`); everything else is forwarded
//! - **End of rows is not an error**: [`DriverError::NoMoreRows`] never marks a span failed
//! - **Per-operation opt out**: [`Options::with_ops_excluded`]
//! - **Pluggable backends**: bring your own [`Tracer`] and [`Logger`], or use the
//!   `tracing` feature
//!
//! ## Capabilities
//!
//! Drivers advertise optional metadata support by overriding the `Rows::as_*`
//! accessors. The wrapper forwards to whichever are present and answers with
//! defaults for the rest:
//!
//! ```ignore
//! use sqltrace::{ColumnTypePrecisionScale, ExecContext, InstrumentedRows, Options};
//!
//! let rows = InstrumentedRows::new(ExecContext::new(), Options::new(), driver_rows);
//! // (0, 0, false) if the driver cannot report precision/scale
//! let (precision, scale, ok) = rows.column_type_precision_scale(0);
//! ```

pub mod driver;
pub mod error;
pub mod monitor;
pub mod prelude;

pub use driver::{
    ColumnTypeDatabaseTypeName, ColumnTypeLength, ColumnTypeNullable, ColumnTypePrecisionScale,
    ColumnTypeScanType, Rows, RowsNextResultSet, ScanType, Value,
};
pub use error::{DriverError, DriverResult, UnknownOp};
pub use monitor::{
    CompositeLogger, ExecContext, FnLogger, InstrumentedRows, LogValue, Logger, NullLogger,
    NullSpan, NullTracer, Op, Options, OptionsFile, RowStats, Span, StatsLogger, Tracer,
};

#[cfg(feature = "tracing")]
pub use monitor::{TracingLogger, TracingSpan, TracingTracer};
