//! A composite printer broadcasting to several outputs
//!
//! Each call runs the group's own sinks first, then the same call on every
//! attached printer in order. One call site can feed the terminal and an
//! audit log at the same time.

use std::sync::Arc;

use super::printer::{Print, Printer};

/// A printer that fans every message out to a list of child printers
#[derive(Clone, Default)]
pub struct PrinterGroup {
    own: Printer,
    printers: Vec<Arc<dyn Print>>,
}

impl PrinterGroup {
    pub fn new(own: Printer, printers: Vec<Arc<dyn Print>>) -> Self {
        Self { own, printers }
    }

    pub fn printers(&self) -> &[Arc<dyn Print>] {
        &self.printers
    }
}

impl std::fmt::Debug for PrinterGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrinterGroup")
            .field("printers", &self.printers.len())
            .finish_non_exhaustive()
    }
}

impl Print for PrinterGroup {
    fn confirm(&self, message: &str) {
        self.own.confirm(message);
        self.printers.iter().for_each(|p| p.confirm(message));
    }

    fn success(&self, message: &str) {
        self.own.success(message);
        self.printers.iter().for_each(|p| p.success(message));
    }

    fn warning(&self, message: &str) {
        self.own.warning(message);
        self.printers.iter().for_each(|p| p.warning(message));
    }

    fn error(&self, message: &str) {
        self.own.error(message);
        self.printers.iter().for_each(|p| p.error(message));
    }

    fn raw(&self, message: &str) {
        self.own.raw(message);
        self.printers.iter().for_each(|p| p.raw(message));
    }
}
