//! User-facing messages: one icon and colour per severity.

use ansi_term::{Colour, Style};
use std::fmt;
use unicode_width::UnicodeWidthStr;

fn tag(colour: Colour, icon: &str) -> String {
    Style::new().bold().fg(colour).paint(icon).to_string()
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", tag(Colour::Blue, "ℹ️"), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", tag(Colour::Green, "✅"), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", tag(Colour::Yellow, "⚠️"), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", tag(Colour::Red, "❌"), msg);
}

/// Section title underlined to its display width.
pub fn section<T: fmt::Display>(title: T) {
    let title = title.to_string();
    println!("\n{}", Colour::Blue.bold().paint(title.as_str()));
    println!("{}", "=".repeat(title.width()));
}

/// Indented list, used to show available columns or values.
pub fn bullets<T: fmt::Display>(label: &str, items: &[T]) {
    println!("{}:", label);
    for item in items {
        println!("  • {}", item);
    }
}
