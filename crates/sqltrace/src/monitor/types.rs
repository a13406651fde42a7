use crate::error::{DriverError, UnknownOp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Identifies an instrumented driver operation.
///
/// Row cursors only ever report [`Op::RowsNext`]; the remaining identifiers
/// exist so one exclusion set can be shared with connection, statement and
/// transaction wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    Prepare,
    ConnExec,
    ConnQuery,
    StmtExec,
    StmtQuery,
    StmtClose,
    TxBegin,
    TxCommit,
    TxRollback,
    ResLastInsertId,
    ResRowsAffected,
    /// Row advancement on a result cursor.
    RowsNext,
    Ping,
    ConnectorConnect,
    Reset,
}

impl Op {
    /// Every known operation, in declaration order.
    pub const ALL: [Op; 15] = [
        Op::Prepare,
        Op::ConnExec,
        Op::ConnQuery,
        Op::StmtExec,
        Op::StmtQuery,
        Op::StmtClose,
        Op::TxBegin,
        Op::TxCommit,
        Op::TxRollback,
        Op::ResLastInsertId,
        Op::ResRowsAffected,
        Op::RowsNext,
        Op::Ping,
        Op::ConnectorConnect,
        Op::Reset,
    ];

    /// The stable string identifier used in span names, log records and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Prepare => "sql-prepare",
            Op::ConnExec => "sql-conn-exec",
            Op::ConnQuery => "sql-conn-query",
            Op::StmtExec => "sql-stmt-exec",
            Op::StmtQuery => "sql-stmt-query",
            Op::StmtClose => "sql-stmt-close",
            Op::TxBegin => "sql-tx-begin",
            Op::TxCommit => "sql-tx-commit",
            Op::TxRollback => "sql-tx-rollback",
            Op::ResLastInsertId => "sql-res-lastInsertId",
            Op::ResRowsAffected => "sql-res-rowsAffected",
            Op::RowsNext => "sql-rows-next",
            Op::Ping => "sql-ping",
            Op::ConnectorConnect => "sql-connector-connect",
            Op::Reset => "sql-reset",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Op {
    type Err = UnknownOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOp(s.to_string()))
    }
}

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Op {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Execution context captured when a cursor is wrapped.
///
/// Backends receive it on every span and log call so they can correlate work
/// to a request. The deadline is informational: the instrumented cursor never
/// enforces it.
#[derive(Debug, Clone, Default)]
pub struct ExecContext {
    /// Point in time after which the caller no longer wants the result.
    pub deadline: Option<Instant>,
    /// Optional query name/tag for identification.
    pub tag: Option<String>,
    /// Optional structured fields for observability (low-cardinality).
    pub fields: BTreeMap<String, String>,
}

impl ExecContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Add a tag to identify this query.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a structured field (low-cardinality).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Time left until the deadline, saturating at zero. `None` without a deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

/// A unit of traced work.
///
/// Backends are best-effort: none of these calls can fail.
pub trait Span: Send + Sync {
    /// Open a child span named after `op`.
    fn new_child(&self, op: Op) -> Box<dyn Span>;

    /// Attach a key/value label.
    fn set_label(&self, key: &str, value: &str);

    /// Mark the span as failed.
    fn set_error(&self, err: &DriverError);

    /// Complete the span.
    fn finish(self: Box<Self>);
}

/// Source of the span that instrumented calls become children of.
pub trait Tracer: Send + Sync {
    /// Return the span active for `ctx`.
    fn get_span(&self, ctx: &ExecContext) -> Box<dyn Span>;
}

/// A structured value attached to a log record.
#[derive(Debug, Clone, Copy)]
pub enum LogValue<'a> {
    /// Outcome of the call: `None` on success.
    Err(Option<&'a DriverError>),
    Duration(Duration),
    Str(&'a str),
}

impl fmt::Display for LogValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Err(None) => f.write_str("<nil>"),
            LogValue::Err(Some(e)) => write!(f, "{e}"),
            LogValue::Duration(d) => write!(f, "{d:?}"),
            LogValue::Str(s) => f.write_str(s),
        }
    }
}

/// Sink for structured log records.
pub trait Logger: Send + Sync {
    /// Emit one record for `op` with ordered key/value pairs.
    fn log(&self, ctx: &ExecContext, op: Op, fields: &[(&str, LogValue<'_>)]);
}
