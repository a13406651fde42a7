//! Benchmark the per-row overhead of `InstrumentedRows` over a bare cursor.
//!
//! Three variants over the same in-memory cursor: unwrapped, wrapped with
//! `Op::RowsNext` excluded, and wrapped with a stats logger attached.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqltrace::{
    DriverError, DriverResult, ExecContext, InstrumentedRows, Op, Options, Rows, StatsLogger,
    Value,
};

/// Cursor that produces `len` identical rows.
struct RepeatRows {
    columns: Vec<String>,
    row: Vec<Value>,
    remaining: usize,
}

impl RepeatRows {
    fn new(len: usize) -> Self {
        Self {
            columns: vec!["id".into(), "name".into()],
            row: vec![Value::Int(42), Value::Text("benchmark".into())],
            remaining: len,
        }
    }
}

impl Rows for RepeatRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn close(&mut self) -> DriverResult<()> {
        Ok(())
    }

    fn next(&mut self, dest: &mut [Value]) -> DriverResult<()> {
        if self.remaining == 0 {
            return Err(DriverError::NoMoreRows);
        }
        self.remaining -= 1;
        dest.clone_from_slice(&self.row);
        Ok(())
    }
}

fn drain(rows: &mut impl Rows) -> usize {
    let mut dest = vec![Value::Null; 2];
    let mut n = 0;
    while rows.next(black_box(&mut dest)).is_ok() {
        n += 1;
    }
    n
}

fn bench_rows_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("rows_next");

    for len in [100usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("bare", len), &len, |b, &len| {
            b.iter(|| drain(&mut RepeatRows::new(len)))
        });

        group.bench_with_input(BenchmarkId::new("excluded", len), &len, |b, &len| {
            let opts = Options::new().with_ops_excluded([Op::RowsNext]);
            b.iter(|| {
                drain(&mut InstrumentedRows::new(
                    ExecContext::new(),
                    opts.clone(),
                    RepeatRows::new(len),
                ))
            })
        });

        group.bench_with_input(BenchmarkId::new("stats", len), &len, |b, &len| {
            let opts = Options::new().with_logger(StatsLogger::new());
            b.iter(|| {
                drain(&mut InstrumentedRows::new(
                    ExecContext::new(),
                    opts.clone(),
                    RepeatRows::new(len),
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rows_next);
criterion_main!(benches);
