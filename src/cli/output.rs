//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Cyan: service names, hints
//! - Bold: headers, values
//! - Dimmed: labels, secondary info

use console::style;
use std::fmt::Display;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ 3 services bound`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ no service named 'db'`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: cfenv services`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold section header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dimmed, value bold), labels padded to align.
///
/// Example: `  algorithm    RSA`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!(
            "  {}  {}",
            style(format!("{:<11}", label)).dim(),
            style(value).bold()
        );
    } else {
        println!("  {:<11}  {}", label, value);
    }
}

/// Print a list item with bullet.
///
/// Example: `  • db (p-mysql)`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Format a service name in cyan.
pub fn service(name: &str) -> String {
    if colors_enabled() {
        style(name).cyan().to_string()
    } else {
        name.to_string()
    }
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Print raw data to stdout, with no decoration.
///
/// Used for values meant to be piped (credentials, URIs).
pub fn data(value: &str) {
    println!("{}", value);
}
