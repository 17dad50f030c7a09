//! Unified output formatting utilities for consistent CLI presentation.
//!
//! Human-facing messages go through the colored helpers below; machine-readable
//! results (validated data, classified errors) are printed as pretty JSON so they
//! can be piped into other tools.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, blue for headers
//! - **Standardized spacing**: Newline before and after human-facing messages
//! - **Plain JSON**: Structured results are never colored

use crate::core::error::Result;
use colored::*;
use serde::Serialize;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.blue());
}

/// Prints `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
