//! CLI command implementations

pub mod audit;
pub mod generate;
pub mod instruments;
pub mod plan;

use colored::Colorize;

/// Prints the cyan banner used at the top of human-readable output.
pub(crate) fn print_banner(title: &str) {
    println!("{}", "======================================".cyan());
    println!("{}", format!("  {}", title).cyan());
    println!("{}", "======================================".cyan());
    println!();
}
