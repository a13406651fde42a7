//! Row cursor contract consumed and exposed by the instrumented cursor.
//!
//! [`Rows`] is the mandatory baseline. Everything else a driver may support is
//! an independent capability trait, discovered per instance through the
//! `Rows::as_*` accessors. An accessor that returns `None` means the cursor
//! does not have that capability; one missing capability says nothing about
//! the others.

use crate::error::DriverResult;
use chrono::{DateTime, Utc};

/// A single column value written into the destination buffer by [`Rows::next`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// SQL NULL
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(DateTime<Utc>),
}

/// The Rust-side kind a column scans into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
    Int,
    Float,
    Bool,
    Bytes,
    Text,
    Timestamp,
    /// The driver cannot narrow the kind further.
    Any,
}

/// An active iterator over a query's result rows.
///
/// `next` fills `dest` with the values of the next row. When iteration is
/// exhausted it returns [`DriverError::NoMoreRows`](crate::DriverError::NoMoreRows).
pub trait Rows {
    /// Column names of the current result set.
    fn columns(&self) -> &[String];

    /// Close the cursor.
    fn close(&mut self) -> DriverResult<()>;

    /// Advance to the next row, writing its values into `dest`.
    ///
    /// `dest` has the same length as [`Rows::columns`].
    fn next(&mut self, dest: &mut [Value]) -> DriverResult<()>;

    fn as_database_type_name(&self) -> Option<&dyn ColumnTypeDatabaseTypeName> {
        None
    }

    fn as_length(&self) -> Option<&dyn ColumnTypeLength> {
        None
    }

    fn as_nullable(&self) -> Option<&dyn ColumnTypeNullable> {
        None
    }

    fn as_precision_scale(&self) -> Option<&dyn ColumnTypePrecisionScale> {
        None
    }

    fn as_scan_type(&self) -> Option<&dyn ColumnTypeScanType> {
        None
    }

    fn as_next_result_set(&self) -> Option<&dyn RowsNextResultSet> {
        None
    }

    /// Mutable counterpart of [`Rows::as_next_result_set`].
    ///
    /// Implementors that return `Some` from one must return `Some` from both.
    fn as_next_result_set_mut(&mut self) -> Option<&mut dyn RowsNextResultSet> {
        None
    }
}

/// Reports the database system type name of a column, e.g. `"VARCHAR"` or `"INT8"`.
pub trait ColumnTypeDatabaseTypeName {
    fn column_type_database_type_name(&self, index: usize) -> String;
}

/// Reports the length of variable-length column types.
///
/// `ok` is `false` if the column type is not variable length.
pub trait ColumnTypeLength {
    fn column_type_length(&self, index: usize) -> (i64, bool);
}

/// Reports whether a column may be null.
///
/// The second element is `false` if nullability is unknown.
pub trait ColumnTypeNullable {
    fn column_type_nullable(&self, index: usize) -> (bool, bool);
}

/// Reports the precision and scale of decimal columns.
pub trait ColumnTypePrecisionScale {
    fn column_type_precision_scale(&self, index: usize) -> (i64, i64, bool);
}

/// Reports the value kind a column scans into.
pub trait ColumnTypeScanType {
    fn column_type_scan_type(&self, index: usize) -> Option<ScanType>;
}

/// Multiple result sets on one cursor.
pub trait RowsNextResultSet {
    /// Whether another result set follows the current one.
    fn has_next_result_set(&self) -> bool;

    /// Advance to the next result set.
    ///
    /// Returns [`DriverError::NoMoreRows`](crate::DriverError::NoMoreRows)
    /// when there is none.
    fn next_result_set(&mut self) -> DriverResult<()>;
}

impl<R: Rows + ?Sized> Rows for &mut R {
    fn columns(&self) -> &[String] {
        (**self).columns()
    }

    fn close(&mut self) -> DriverResult<()> {
        (**self).close()
    }

    fn next(&mut self, dest: &mut [Value]) -> DriverResult<()> {
        (**self).next(dest)
    }

    fn as_database_type_name(&self) -> Option<&dyn ColumnTypeDatabaseTypeName> {
        (**self).as_database_type_name()
    }

    fn as_length(&self) -> Option<&dyn ColumnTypeLength> {
        (**self).as_length()
    }

    fn as_nullable(&self) -> Option<&dyn ColumnTypeNullable> {
        (**self).as_nullable()
    }

    fn as_precision_scale(&self) -> Option<&dyn ColumnTypePrecisionScale> {
        (**self).as_precision_scale()
    }

    fn as_scan_type(&self) -> Option<&dyn ColumnTypeScanType> {
        (**self).as_scan_type()
    }

    fn as_next_result_set(&self) -> Option<&dyn RowsNextResultSet> {
        (**self).as_next_result_set()
    }

    fn as_next_result_set_mut(&mut self) -> Option<&mut dyn RowsNextResultSet> {
        (**self).as_next_result_set_mut()
    }
}

impl<R: Rows + ?Sized> Rows for Box<R> {
    fn columns(&self) -> &[String] {
        (**self).columns()
    }

    fn close(&mut self) -> DriverResult<()> {
        (**self).close()
    }

    fn next(&mut self, dest: &mut [Value]) -> DriverResult<()> {
        (**self).next(dest)
    }

    fn as_database_type_name(&self) -> Option<&dyn ColumnTypeDatabaseTypeName> {
        (**self).as_database_type_name()
    }

    fn as_length(&self) -> Option<&dyn ColumnTypeLength> {
        (**self).as_length()
    }

    fn as_nullable(&self) -> Option<&dyn ColumnTypeNullable> {
        (**self).as_nullable()
    }

    fn as_precision_scale(&self) -> Option<&dyn ColumnTypePrecisionScale> {
        (**self).as_precision_scale()
    }

    fn as_scan_type(&self) -> Option<&dyn ColumnTypeScanType> {
        (**self).as_scan_type()
    }

    fn as_next_result_set(&self) -> Option<&dyn RowsNextResultSet> {
        (**self).as_next_result_set()
    }

    fn as_next_result_set_mut(&mut self) -> Option<&mut dyn RowsNextResultSet> {
        (**self).as_next_result_set_mut()
    }
}
