//! Printing of the fonts that render each text identifier.

use std::io::{self, Write};

use anyhow::{Context, Result};
use glyph_spec::{Config, FontSet, pipeline};

use crate::cli::UsagesConfiguration;

/// Prints one line per text identifier listing the fonts that render it.
///
/// # Errors
///
/// Returns errors when the screen document cannot be loaded or resolved, or when writing to
/// standard output fails.
pub fn usages(config: &Config, usages: UsagesConfiguration) -> Result<()> {
    let usage = pipeline::load_usage(&usages.screens, config)
        .context("failed to resolve font usage")?;

    let mut stdout = io::stdout().lock();
    for (text_id, fonts) in usage.iter() {
        writeln!(stdout, "{}", usage_line(text_id, fonts))?;
    }

    Ok(())
}

/// Formats the fonts rendering `text_id` as `<text id>: <font> <font> ...`.
fn usage_line(text_id: &str, fonts: &FontSet) -> String {
    let mut line = format!("{text_id}:");
    for font in fonts.iter() {
        line.push_str(&format!(" {font}"));
    }

    line
}
