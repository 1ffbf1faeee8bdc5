//! Sequencing of the resolution stages from input documents to emitted records.
//!
//! Every document is loaded and every stage resolved before the first record is written, so a
//! malformed input never results in a partially populated output directory.

use std::{
    error, fmt,
    path::{Path, PathBuf},
};

use crate::{
    characters::{self, CharacterWarning, CodePoints, ResolveCharactersError},
    config::Config,
    document::{DocumentSource, LoadDocumentError},
    emit::{self, EmitError, EmitSummary},
    metadata::{self, FontTable, LoadMetadataError},
    usage::{self, FontUsage, ResolveUsageError},
};

/// The documents consumed by the pipeline.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Inputs {
    /// The screen document describing which fonts render each text identifier.
    pub screens: PathBuf,
    /// The translation documents providing the text of each text identifier.
    pub translations: Vec<PathBuf>,
    /// The physical attributes document describing each font.
    pub attributes: PathBuf,
}

/// The outcome of a successful [`run()`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Report {
    /// The number of displayed text identifiers.
    pub text_ids: usize,
    /// The number of glyphs required across all fonts.
    pub glyphs: usize,
    /// The [`CharacterWarning`]s raised while resolving code points.
    pub warnings: Vec<CharacterWarning>,
    /// The records written and found.
    pub summary: EmitSummary,
}

/// Resolves the [`FontUsage`] described by the screen document at `path`.
///
/// # Errors
///
/// - [`PipelineError::Document`]: Returned if the document could not be loaded.
/// - [`PipelineError::Usage`]: Returned if the font usage could not be resolved.
pub fn load_usage(path: &Path, config: &Config) -> Result<FontUsage, PipelineError> {
    let source = DocumentSource::load(path)?;
    let document = source.parse()?;

    usage::resolve_font_usage(&document, config.font_count).map_err(|error| {
        PipelineError::Usage {
            path: source.path().to_path_buf(),
            error,
        }
    })
}

/// Resolves the code points required by the translation documents at `paths`.
///
/// # Errors
///
/// - [`PipelineError::Document`]: Returned if a document could not be loaded.
/// - [`PipelineError::Characters`]: Returned if the required code points could not be resolved.
pub fn load_code_points(
    usage: &FontUsage,
    paths: &[PathBuf],
    config: &Config,
) -> Result<(CodePoints, Vec<CharacterWarning>), PipelineError> {
    let mut code_points = CodePoints::new(config.font_count);
    let mut warnings = Vec::new();

    for path in paths {
        let source = DocumentSource::load(path)?;
        let document = source.parse()?;

        let found = characters::resolve_characters(usage, &document, &mut code_points).map_err(
            |error| PipelineError::Characters {
                path: source.path().to_path_buf(),
                error,
            },
        )?;
        warnings.extend(found);
    }

    for (font, required) in code_points.iter() {
        log::info!("FONT{font} requires {} glyphs", required.len());
    }
    Ok((code_points, warnings))
}

/// Loads the [`FontTable`] described by the physical attributes document at `path`.
///
/// # Errors
///
/// - [`PipelineError::Document`]: Returned if the document could not be loaded.
/// - [`PipelineError::Metadata`]: Returned if the font metadata could not be loaded.
pub fn load_fonts(path: &Path, config: &Config) -> Result<FontTable, PipelineError> {
    let source = DocumentSource::load(path)?;
    let document = source.parse()?;

    metadata::load_font_metadata(&document, config).map_err(|error| PipelineError::Metadata {
        path: source.path().to_path_buf(),
        error,
    })
}

/// Resolves every glyph required by `inputs` and emits its record into `output`.
///
/// # Errors
///
/// Returns the first error raised by [`load_usage()`], [`load_code_points()`], [`load_fonts()`],
/// or [`emit_specs()`][es].
///
/// [es]: crate::emit::emit_specs
pub fn run(inputs: &Inputs, output: &Path, config: &Config) -> Result<Report, PipelineError> {
    let usage = load_usage(&inputs.screens, config)?;
    let (code_points, warnings) = load_code_points(&usage, &inputs.translations, config)?;
    let fonts = load_fonts(&inputs.attributes, config)?;

    let summary = emit::emit_specs(&code_points, &fonts, output, config.max_record_len)?;

    Ok(Report {
        text_ids: usage.len(),
        glyphs: code_points.glyph_count(),
        warnings,
        summary,
    })
}

/// Various errors that can occur while running the pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// An input document could not be loaded.
    Document(LoadDocumentError),
    /// The font usage of a screen document could not be resolved.
    Usage {
        /// The location of the screen document.
        path: PathBuf,
        /// The underlying error.
        error: ResolveUsageError,
    },
    /// The code points required by a translation document could not be resolved.
    Characters {
        /// The location of the translation document.
        path: PathBuf,
        /// The underlying error.
        error: ResolveCharactersError,
    },
    /// The font metadata could not be loaded.
    Metadata {
        /// The location of the physical attributes document.
        path: PathBuf,
        /// The underlying error.
        error: LoadMetadataError,
    },
    /// The records could not be emitted.
    Emit(EmitError),
}

impl From<LoadDocumentError> for PipelineError {
    fn from(value: LoadDocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<EmitError> for PipelineError {
    fn from(value: EmitError) -> Self {
        Self::Emit(value)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(error) => fmt::Display::fmt(error, f),
            Self::Usage { path, error } => write!(f, "{}: {error}", path.display()),
            Self::Characters { path, error } => write!(f, "{}: {error}", path.display()),
            Self::Metadata { path, error } => write!(f, "{}: {error}", path.display()),
            Self::Emit(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Document(inner) => error::Error::source(inner),
            Self::Emit(inner) => error::Error::source(inner),
            Self::Usage { .. } | Self::Characters { .. } | Self::Metadata { .. } => None,
        }
    }
}
