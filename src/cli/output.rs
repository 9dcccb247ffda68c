use colored::Colorize;
use std::fmt;

use crate::analytics::export::format_major_units;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => format!("[✓] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").bright_red().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// `label: value` with a dimmed label, used for record detail lines.
pub fn field(label: &str, value: impl fmt::Display) {
    println!("  {} {}", format!("{label}:").dimmed(), value);
}

/// Minor currency units rendered as a display amount.
pub fn money(amount: i64) -> String {
    format_major_units(amount)
}
