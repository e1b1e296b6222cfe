//! Terminal output helpers shared by every step
//!
//! Warnings are one line starting with `warning:` so they are easy to grep
//! in captured output. Colour is applied by `colored`, which turns itself
//! off when stdout is not a terminal.

use colored::Colorize;

/// Print a non-fatal diagnostic
pub fn warn(message: impl AsRef<str>) {
    println!("{} {}", "warning:".yellow().bold(), message.as_ref());
}

/// Print a completed step
pub fn success(message: impl AsRef<str>) {
    println!("  {} {}", "✓".green(), message.as_ref());
}

/// Print a section heading
pub fn heading(title: impl AsRef<str>) {
    println!("\n{}\n", format!("=== {} ===", title.as_ref()).bold());
}
