//! Instruments command implementation
//!
//! Lists the General MIDI program catalog, optionally filtered by category.

use anyhow::{Context, Result};
use colored::Colorize;
use scaleset_spec::{InstrumentDescriptor, GM_CATEGORIES, MAX_PROGRAM};
use std::process::ExitCode;

/// General MIDI instruments, optionally limited to one category
/// (case-insensitive).
pub fn catalog(category: Option<&str>) -> Result<Vec<InstrumentDescriptor>> {
    if let Some(category) = category {
        if !GM_CATEGORIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
        {
            anyhow::bail!(
                "Unknown category '{}'. Expected one of: {}",
                category,
                GM_CATEGORIES.join(", ")
            );
        }
    }

    let mut instruments = Vec::new();
    for program in 0..=MAX_PROGRAM {
        let instrument = InstrumentDescriptor::general_midi(program)
            .with_context(|| format!("Missing catalog entry for program {}", program))?;
        if category.map_or(true, |c| instrument.category.eq_ignore_ascii_case(c)) {
            instruments.push(instrument);
        }
    }
    Ok(instruments)
}

/// Run the instruments command
///
/// # Arguments
/// * `category` - Optional category filter
/// * `json` - Print the list as JSON
pub fn run(category: Option<&str>, json: bool) -> Result<ExitCode> {
    let instruments = catalog(category)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&instruments)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut current = "";
    for instrument in &instruments {
        if instrument.category != current {
            current = &instrument.category;
            println!("{}", current.blue().bold());
        }
        println!("  {:>3}  {}", instrument.program, instrument.name);
    }
    Ok(ExitCode::SUCCESS)
}
