//! Convenient imports for typical `sqltrace` usage.
//!
//! Brings the cursor contract, every capability trait (so their methods are
//! callable on [`InstrumentedRows`](crate::InstrumentedRows)) and the
//! configuration types into scope:
//!
//! ```ignore
//! use sqltrace::prelude::*;
//! ```

pub use crate::{
    ColumnTypeDatabaseTypeName, ColumnTypeLength, ColumnTypeNullable, ColumnTypePrecisionScale,
    ColumnTypeScanType, DriverError, DriverResult, ExecContext, InstrumentedRows, Op, Options,
    Rows, RowsNextResultSet, ScanType, Value,
};
