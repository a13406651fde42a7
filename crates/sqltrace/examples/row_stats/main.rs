//! Example demonstrating row-advance logging and statistics via InstrumentedRows.
//!
//! Run with:
//!   cargo run --example row_stats -p sqltrace

use sqltrace::prelude::*;
use sqltrace::{CompositeLogger, FnLogger, StatsLogger};
use std::sync::Arc;
use std::time::Duration;

/// A stand-in for a real driver cursor: a fixed list of orders.
struct OrderRows {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Vec<Value>>,
}

impl OrderRows {
    fn new() -> Self {
        let rows = (1..=3)
            .map(|id| vec![Value::Int(id), Value::Float(id as f64 * 9.99)])
            .collect::<Vec<_>>();
        Self {
            columns: vec!["id".into(), "total".into()],
            rows: rows.into_iter(),
        }
    }
}

impl Rows for OrderRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn close(&mut self) -> DriverResult<()> {
        Ok(())
    }

    fn next(&mut self, dest: &mut [Value]) -> DriverResult<()> {
        let row = self.rows.next().ok_or(DriverError::NoMoreRows)?;
        dest.clone_from_slice(&row);
        Ok(())
    }

    fn as_precision_scale(&self) -> Option<&dyn ColumnTypePrecisionScale> {
        Some(self)
    }
}

impl ColumnTypePrecisionScale for OrderRows {
    fn column_type_precision_scale(&self, index: usize) -> (i64, i64, bool) {
        match index {
            1 => (12, 2, true),
            _ => (0, 0, false),
        }
    }
}

fn main() -> DriverResult<()> {
    let stats = Arc::new(StatsLogger::new());
    let printer = FnLogger::new(|ctx, op, fields| {
        let kv: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let tag = ctx.tag.as_deref().unwrap_or("-");
        eprintln!("[sqltrace] [{op}] [{tag}] {}", kv.join(" "));
    });
    let logger = CompositeLogger::new().add(printer).add_arc(stats.clone());

    let opts = Options::new().with_logger(logger);
    let ctx = ExecContext::new()
        .with_tag("list_orders")
        .with_timeout(Duration::from_secs(5));

    let mut rows = InstrumentedRows::new(ctx, opts, OrderRows::new());
    println!("columns: {:?}", rows.columns());
    println!(
        "total precision/scale: {:?}",
        rows.column_type_precision_scale(1)
    );
    println!("id type name: {:?}", rows.column_type_database_type_name(0));

    let mut dest = vec![Value::Null; rows.columns().len()];
    loop {
        match rows.next(&mut dest) {
            Ok(()) => println!("row: {dest:?}"),
            Err(e) if e.is_no_more_rows() => break,
            Err(e) => return Err(e),
        }
    }
    rows.close()?;

    match rows.next_result_set() {
        Err(e) if e.is_skip() => println!("driver has a single result set"),
        other => println!("next result set: {other:?}"),
    }

    println!("{:#?}", stats.stats());
    Ok(())
}
