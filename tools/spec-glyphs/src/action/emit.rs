//! Resolution of every required glyph and emission of its specification record.

use anyhow::{Context, Result};
use glyph_spec::{Config, pipeline};

use crate::cli::EmitConfiguration;

/// Emits a specification record for every glyph required by the documents in `emit`.
///
/// # Errors
///
/// Returns errors when a document cannot be loaded or resolved, or when a record cannot be
/// written.
pub fn emit(config: &Config, emit: EmitConfiguration) -> Result<()> {
    let report = pipeline::run(&emit.inputs, &emit.output, config)
        .with_context(|| format!("failed to emit glyph specs into {}", emit.output.display()))?;

    if !report.warnings.is_empty() {
        log::warn!(
            "{} translation warnings, see above",
            report.warnings.len()
        );
    }
    log::info!(
        "{} text identifiers require {} glyphs: {} written, {} already present",
        report.text_ids,
        report.glyphs,
        report.summary.written,
        report.summary.present
    );

    Ok(())
}
