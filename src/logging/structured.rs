use std::collections::BTreeMap;
use tracing::{Level, debug, error, info, trace, warn};

/// Fields attached to every message of one logger
#[derive(Debug, Clone)]
pub struct LogContext {
    /// Component name (e.g., "logger", "transport", "storage")
    pub component: String,
    /// Logging session this message belongs to
    pub session_id: Option<String>,
    /// Additional fields, emitted in key order
    pub extra_fields: BTreeMap<String, String>,
}

impl LogContext {
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            session_id: None,
            extra_fields: BTreeMap::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_field(mut self, key: &str, value: impl ToString) -> Self {
        self.extra_fields.insert(key.to_string(), value.to_string());
        self
    }
}

/// Component logger that prefixes each event with its context fields
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    context: LogContext,
}

impl StructuredLogger {
    pub fn new(context: LogContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::ERROR, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Level::WARN, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::INFO, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::DEBUG, message);
    }

    pub fn trace(&self, message: &str) {
        self.emit(Level::TRACE, message);
    }

    fn emit(&self, level: Level, message: &str) {
        let fields = self.fields();
        match level {
            Level::ERROR => error!(%fields, "{}", message),
            Level::WARN => warn!(%fields, "{}", message),
            Level::INFO => info!(%fields, "{}", message),
            Level::DEBUG => debug!(%fields, "{}", message),
            Level::TRACE => trace!(%fields, "{}", message),
        }
    }

    /// `component=..[,session_id=..][,key=value...]`
    pub fn fields(&self) -> String {
        let ctx = &self.context;
        std::iter::once(format!("component={}", ctx.component))
            .chain(ctx.session_id.iter().map(|id| format!("session_id={}", id)))
            .chain(ctx.extra_fields.iter().map(|(k, v)| format!("{}={}", k, v)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Logger for a component without session context
pub fn get_logger(component: &str) -> StructuredLogger {
    StructuredLogger::new(LogContext::new(component))
}

pub fn get_logger_with_context(context: LogContext) -> StructuredLogger {
    StructuredLogger::new(context)
}
