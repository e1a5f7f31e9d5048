//! Output module
//!
//! Printables describe what to say, printers decide how to say it. Routes
//! never write to the terminal directly.

pub mod audit;
pub mod console;
pub mod group;
pub mod printable;
pub mod printer;

use std::sync::Arc;

pub use group::PrinterGroup;
pub use printable::{Message, MessageRef, PrintKind, Printable};
pub use printer::{Print, Printer, PrinterBuilder, Sink};

use crate::errors::{AppError, AppResult};

/// Look up a built-in printer by its configured name
pub fn named_printer(name: &str) -> AppResult<Printer> {
    match name {
        "console" => Ok(console::printer()),
        "log" => Ok(audit::printer()),
        other => Err(AppError::UnknownPrinter {
            name: other.to_string(),
        }),
    }
}

/// Build the group of printers the application writes to
pub fn printer_group(names: &[String]) -> AppResult<PrinterGroup> {
    let printers = names
        .iter()
        .map(|name| named_printer(name).map(|p| Arc::new(p) as Arc<dyn Print>))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(PrinterGroup::new(Printer::silent(), printers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printer_group_from_names() {
        let group = printer_group(&["console".to_string(), "log".to_string()]).unwrap();
        assert_eq!(group.printers().len(), 2);
    }

    #[test]
    fn test_unknown_printer_name() {
        let err = printer_group(&["fax".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::UnknownPrinter { name } if name == "fax"));
    }
}
