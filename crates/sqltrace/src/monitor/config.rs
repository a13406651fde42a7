use super::monitors::{NullLogger, NullTracer};
use super::types::{Logger, Op, Tracer};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Label value identifying this crate as the originating subsystem.
pub const DEFAULT_COMPONENT: &str = "sqltrace";

/// Instrumentation options captured by a wrapper at construction.
///
/// By default nothing is traced or logged: the tracer and logger are no-ops
/// and must be replaced explicitly.
#[derive(Clone)]
pub struct Options {
    pub(crate) tracer: Arc<dyn Tracer>,
    pub(crate) logger: Arc<dyn Logger>,
    pub(crate) ops_excluded: HashSet<Op>,
    pub(crate) component: Cow<'static, str>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tracer: Arc::new(NullTracer),
            logger: Arc::new(NullLogger),
            ops_excluded: HashSet::new(),
            component: Cow::Borrowed(DEFAULT_COMPONENT),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("ops_excluded", &self.ops_excluded)
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

impl Options {
    /// Create options with defaults (no-op tracer and logger, nothing excluded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tracer.
    pub fn with_tracer<T: Tracer + 'static>(mut self, tracer: T) -> Self {
        self.tracer = Arc::new(tracer);
        self
    }

    /// Set the tracer from an Arc.
    pub fn with_tracer_arc(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = tracer;
        self
    }

    /// Set the logger.
    pub fn with_logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Set the logger from an Arc.
    pub fn with_logger_arc(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Skip spans and log records for the given operations.
    ///
    /// Adds to any operations already excluded.
    pub fn with_ops_excluded(mut self, ops: impl IntoIterator<Item = Op>) -> Self {
        self.ops_excluded.extend(ops);
        self
    }

    /// Override the `component` label put on every span.
    pub fn with_component(mut self, component: impl Into<Cow<'static, str>>) -> Self {
        self.component = component.into();
        self
    }

    /// Whether instrumentation is disabled for `op`.
    pub fn has_op_excluded(&self, op: Op) -> bool {
        self.ops_excluded.contains(&op)
    }

    /// The `component` label value.
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn tracer(&self) -> &Arc<dyn Tracer> {
        &self.tracer
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }
}

/// Serializable subset of [`Options`], for loading from a config file.
///
/// ```toml
/// ops_excluded = ["sql-rows-next", "sql-ping"]
/// component = "orders-db"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsFile {
    /// Operation identifiers to exclude from instrumentation.
    pub ops_excluded: Vec<Op>,
    /// `component` label override.
    pub component: Option<String>,
}

impl OptionsFile {
    /// Apply these settings on top of `base`, keeping its tracer and logger.
    pub fn apply(self, base: Options) -> Options {
        let opts = base.with_ops_excluded(self.ops_excluded);
        match self.component {
            Some(component) => opts.with_component(component),
            None => opts,
        }
    }
}

impl From<OptionsFile> for Options {
    fn from(file: OptionsFile) -> Self {
        file.apply(Options::new())
    }
}
