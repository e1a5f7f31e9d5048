//! Printers turn printables into output
//!
//! `Print` is the capability every output target implements. The provided
//! `print` method does the recursive dispatch, so implementors only decide
//! what each kind of message looks like. `Printer` is the sink-based
//! implementation: a printer for a context (terminal, log, GUI box) is just
//! a set of callbacks, and kinds without a callback are silently dropped.

use std::sync::Arc;

use super::printable::{MessageRef, PrintKind, Printable};

/// Something that can display printables
pub trait Print: Send + Sync {
    fn confirm(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn raw(&self, message: &str);

    /// Print a single printable, expanding groups depth-first
    fn print(&self, printable: &Printable) {
        match printable.message() {
            MessageRef::Nested(children) => self.print_all(children),
            MessageRef::Text(kind, text) => match kind {
                PrintKind::Confirm => self.confirm(text),
                PrintKind::Success => self.success(text),
                PrintKind::Warning => self.warning(text),
                PrintKind::Error => self.error(text),
                PrintKind::Raw => self.raw(text),
                // Groups never carry text.
                PrintKind::Print => {}
            },
        }
    }

    /// Print a sequence of printables in order
    fn print_all(&self, printables: &[Printable]) {
        for printable in printables {
            self.print(printable);
        }
    }
}

/// Callback receiving the text of one message
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// A printer assembled from per-kind sinks
#[derive(Clone, Default)]
pub struct Printer {
    confirm: Option<Sink>,
    success: Option<Sink>,
    warning: Option<Sink>,
    error: Option<Sink>,
    raw: Option<Sink>,
}

impl Printer {
    /// A printer that drops every message
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn builder() -> PrinterBuilder {
        PrinterBuilder::default()
    }

    fn emit(sink: &Option<Sink>, message: &str) {
        if let Some(sink) = sink {
            sink(message);
        }
    }
}

impl Print for Printer {
    fn confirm(&self, message: &str) {
        Self::emit(&self.confirm, message);
    }

    fn success(&self, message: &str) {
        Self::emit(&self.success, message);
    }

    fn warning(&self, message: &str) {
        Self::emit(&self.warning, message);
    }

    fn error(&self, message: &str) {
        Self::emit(&self.error, message);
    }

    fn raw(&self, message: &str) {
        Self::emit(&self.raw, message);
    }
}

/// Builder collecting the sinks of a `Printer`
#[derive(Default)]
pub struct PrinterBuilder {
    printer: Printer,
}

impl PrinterBuilder {
    pub fn confirm(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.printer.confirm = Some(Arc::new(sink));
        self
    }

    pub fn success(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.printer.success = Some(Arc::new(sink));
        self
    }

    pub fn warning(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.printer.warning = Some(Arc::new(sink));
        self
    }

    pub fn error(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.printer.error = Some(Arc::new(sink));
        self
    }

    pub fn raw(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.printer.raw = Some(Arc::new(sink));
        self
    }

    /// Route every kind to the same sink, tagged with the kind
    pub fn all(self, sink: impl Fn(PrintKind, &str) + Send + Sync + 'static) -> Self {
        let sink = Arc::new(sink);
        let confirm = Arc::clone(&sink);
        let success = Arc::clone(&sink);
        let warning = Arc::clone(&sink);
        let error = Arc::clone(&sink);
        self.confirm(move |m| confirm(PrintKind::Confirm, m))
            .success(move |m| success(PrintKind::Success, m))
            .warning(move |m| warning(PrintKind::Warning, m))
            .error(move |m| error(PrintKind::Error, m))
            .raw(move |m| sink(PrintKind::Raw, m))
    }

    pub fn build(self) -> Printer {
        self.printer
    }
}
