//! Printing of the code points each font must render.

use std::{
    collections::BTreeSet,
    io::{self, Write},
};

use anyhow::{Context, Result};
use glyph_spec::{Config, pipeline};

use crate::cli::CharactersConfiguration;

/// Prints one line per font listing the code points it must render.
///
/// # Errors
///
/// Returns errors when a document cannot be loaded or resolved, or when writing to standard
/// output fails.
pub fn characters(config: &Config, characters: CharactersConfiguration) -> Result<()> {
    let usage = pipeline::load_usage(&characters.screens, config)
        .context("failed to resolve font usage")?;
    let (code_points, _) = pipeline::load_code_points(&usage, &characters.translations, config)
        .context("failed to resolve required code points")?;

    let mut stdout = io::stdout().lock();
    for (font, required) in code_points.iter() {
        writeln!(stdout, "{}", font_line(font, required))?;
    }

    Ok(())
}

/// Formats the code points required by `font` as `FONT<n>: U+XXXX U+XXXX ...`.
fn font_line(font: usize, required: &BTreeSet<char>) -> String {
    let mut line = format!("FONT{font}:");
    for &code_point in required {
        line.push_str(&format!(" U+{:04X}", u32::from(code_point)));
    }

    line
}
