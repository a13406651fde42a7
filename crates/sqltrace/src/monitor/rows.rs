use super::config::Options;
use super::types::{ExecContext, LogValue, Op, Span};
use crate::driver::{
    ColumnTypeDatabaseTypeName, ColumnTypeLength, ColumnTypeNullable, ColumnTypePrecisionScale,
    ColumnTypeScanType, Rows, RowsNextResultSet, ScanType, Value,
};
use crate::error::{DriverError, DriverResult};
use std::time::Instant;

/// A row cursor that wraps a driver [`Rows`] with tracing and logging.
///
/// Only [`Rows::next`] is instrumented. Every other call, including the
/// optional capability queries, is forwarded to the wrapped cursor unchanged.
/// The wrapper itself reports every capability as present and falls back to
/// the documented defaults when the wrapped cursor lacks one.
pub struct InstrumentedRows<R> {
    parent: R,
    ctx: ExecContext,
    opts: Options,
}

impl<R: Rows> InstrumentedRows<R> {
    /// Wrap `parent`. `ctx` and `opts` are fixed for the lifetime of the wrapper.
    pub fn new(ctx: ExecContext, opts: Options, parent: R) -> Self {
        Self { parent, ctx, opts }
    }

    /// Get a reference to the wrapped cursor.
    pub fn inner(&self) -> &R {
        &self.parent
    }

    /// Get the wrapped cursor, consuming this wrapper.
    pub fn into_inner(self) -> R {
        self.parent
    }

    pub fn context(&self) -> &ExecContext {
        &self.ctx
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }
}

/// Open the span for `op`, or return `None` when `op` is excluded.
fn begin_call<'a>(ctx: &'a ExecContext, opts: &'a Options, op: Op) -> Option<CallGuard<'a>> {
    if opts.has_op_excluded(op) {
        return None;
    }

    let span = opts.tracer.get_span(ctx).new_child(op);
    span.set_label("component", opts.component());

    Some(CallGuard {
        op,
        ctx,
        opts,
        span: Some(span),
        start: Instant::now(),
        outcome: None,
    })
}

/// Finishes the span and emits the log record for one instrumented call.
///
/// Runs on drop so unwinding out of the driver still closes the span.
struct CallGuard<'a> {
    op: Op,
    ctx: &'a ExecContext,
    opts: &'a Options,
    span: Option<Box<dyn Span>>,
    start: Instant,
    outcome: Option<DriverError>,
}

impl CallGuard<'_> {
    fn record(&mut self, result: &DriverResult<()>) {
        self.outcome = result.as_ref().err().cloned();
    }
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        if let Some(span) = self.span.take() {
            if let Some(err) = self.outcome.as_ref().filter(|e| !e.is_no_more_rows()) {
                span.set_error(err);
            }
            span.finish();
        }

        let duration = self.start.elapsed();
        self.opts.logger.log(
            self.ctx,
            self.op,
            &[
                ("err", LogValue::Err(self.outcome.as_ref())),
                ("duration", LogValue::Duration(duration)),
            ],
        );
    }
}

impl<R: Rows> Rows for InstrumentedRows<R> {
    fn columns(&self) -> &[String] {
        self.parent.columns()
    }

    fn close(&mut self) -> DriverResult<()> {
        self.parent.close()
    }

    fn next(&mut self, dest: &mut [Value]) -> DriverResult<()> {
        // The guard borrows `ctx` and `opts` while `parent` is borrowed mutably.
        let Self { parent, ctx, opts } = self;
        let mut guard = begin_call(ctx, opts, Op::RowsNext);

        let result = parent.next(dest);
        if let Some(guard) = guard.as_mut() {
            guard.record(&result);
        }
        result
    }

    fn as_database_type_name(&self) -> Option<&dyn ColumnTypeDatabaseTypeName> {
        Some(self)
    }

    fn as_length(&self) -> Option<&dyn ColumnTypeLength> {
        Some(self)
    }

    fn as_nullable(&self) -> Option<&dyn ColumnTypeNullable> {
        Some(self)
    }

    fn as_precision_scale(&self) -> Option<&dyn ColumnTypePrecisionScale> {
        Some(self)
    }

    fn as_scan_type(&self) -> Option<&dyn ColumnTypeScanType> {
        Some(self)
    }

    fn as_next_result_set(&self) -> Option<&dyn RowsNextResultSet> {
        Some(self)
    }

    fn as_next_result_set_mut(&mut self) -> Option<&mut dyn RowsNextResultSet> {
        Some(self)
    }
}

impl<R: Rows> ColumnTypeDatabaseTypeName for InstrumentedRows<R> {
    fn column_type_database_type_name(&self, index: usize) -> String {
        match self.parent.as_database_type_name() {
            Some(ct) => ct.column_type_database_type_name(index),
            None => String::new(),
        }
    }
}

impl<R: Rows> ColumnTypeLength for InstrumentedRows<R> {
    fn column_type_length(&self, index: usize) -> (i64, bool) {
        match self.parent.as_length() {
            Some(ct) => ct.column_type_length(index),
            None => (0, false),
        }
    }
}

impl<R: Rows> ColumnTypeNullable for InstrumentedRows<R> {
    fn column_type_nullable(&self, index: usize) -> (bool, bool) {
        match self.parent.as_nullable() {
            Some(ct) => ct.column_type_nullable(index),
            None => (false, false),
        }
    }
}

impl<R: Rows> ColumnTypePrecisionScale for InstrumentedRows<R> {
    fn column_type_precision_scale(&self, index: usize) -> (i64, i64, bool) {
        match self.parent.as_precision_scale() {
            Some(ct) => ct.column_type_precision_scale(index),
            None => (0, 0, false),
        }
    }
}

impl<R: Rows> ColumnTypeScanType for InstrumentedRows<R> {
    fn column_type_scan_type(&self, index: usize) -> Option<ScanType> {
        self.parent
            .as_scan_type()
            .and_then(|ct| ct.column_type_scan_type(index))
    }
}

impl<R: Rows> RowsNextResultSet for InstrumentedRows<R> {
    fn has_next_result_set(&self) -> bool {
        self.parent
            .as_next_result_set()
            .is_some_and(|nr| nr.has_next_result_set())
    }

    fn next_result_set(&mut self) -> DriverResult<()> {
        match self.parent.as_next_result_set_mut() {
            Some(nr) => nr.next_result_set(),
            None => Err(DriverError::Skip),
        }
    }
}
