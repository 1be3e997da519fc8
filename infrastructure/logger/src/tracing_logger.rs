use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Forwards domain log messages to `tracing`, tagged with the component
/// that emitted them.
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "relay_server", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "relay_server", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "relay_server", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "relay_server", component = self.component, "{}", message);
    }
}
