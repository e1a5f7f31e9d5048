//! The terminal printer
//!
//! Messages are prefixed with coloured arrows; errors go to stderr.

use colored::{Color, Colorize};

use super::printer::Printer;

fn arrows(color: Color, message: &str) -> String {
    format!("{} {}", ">>".color(color), message)
}

/// Build the console printer
pub fn printer() -> Printer {
    Printer::builder()
        .confirm(|m| println!("{}", arrows(Color::Blue, m)))
        .success(|m| println!("{}", arrows(Color::Green, m)))
        .warning(|m| println!("{}", arrows(Color::Yellow, m)))
        .error(|m| eprintln!("{}", arrows(Color::Red, m)))
        .raw(|m| println!("{m}"))
        .build()
}
