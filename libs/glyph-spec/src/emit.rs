//! Emission of content-addressed [`SpecRecord`] files.

use std::{
    error, fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::{
    characters::CodePoints,
    metadata::FontTable,
    record::{FormatRecordError, FormattedRecord, SpecRecord},
};

/// Counts of the records handled by [`emit_specs()`].
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct EmitSummary {
    /// The number of record files created.
    pub written: usize,
    /// The number of records whose file already existed.
    pub present: usize,
}

impl EmitSummary {
    /// Returns the total number of records handled.
    pub const fn total(&self) -> usize {
        self.written + self.present
    }
}

/// The result of storing a single record.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record file was created.
    Written,
    /// A file with the record's name already existed.
    Present,
}

/// Writes one file per required glyph in `code_points` into `dir`, creating `dir` if needed.
///
/// Each file is named by the digest of its record, so records already present in `dir` are not
/// written again. Emission stops at the first error, leaving any files already written in place.
///
/// # Errors
///
/// - [`EmitError::MissingMetadata`]: Returned if a font requiring glyphs has no entry in `fonts`.
/// - [`EmitError::Format`]: Returned if a record is longer than `max_record_len` bytes.
/// - [`EmitError::CreateDirectory`]: Returned if `dir` could not be created.
/// - [`EmitError::Write`]: Returned if a record file could not be written.
pub fn emit_specs(
    code_points: &CodePoints,
    fonts: &FontTable,
    dir: &Path,
    max_record_len: usize,
) -> Result<EmitSummary, EmitError> {
    fs::create_dir_all(dir).map_err(|error| EmitError::CreateDirectory {
        path: dir.to_path_buf(),
        error,
    })?;

    let mut summary = EmitSummary::default();
    for (font, required) in code_points.iter() {
        if required.is_empty() {
            continue;
        }

        let metadata = fonts
            .get(font)
            .ok_or(EmitError::MissingMetadata { font })?;

        for &code_point in required {
            let record = SpecRecord::new(code_point, metadata).format(max_record_len)?;
            match write_record(dir, &record)? {
                WriteOutcome::Written => summary.written += 1,
                WriteOutcome::Present => summary.present += 1,
            }
        }
    }

    log::info!(
        "{} records written, {} already present in {}",
        summary.written,
        summary.present,
        dir.display()
    );
    Ok(summary)
}

/// Stores `record` in `dir` under its digest, unless a file with that name exists.
///
/// The record is first written to a hidden sibling and then renamed into place, so an
/// interrupted write never leaves a partial file under the record's name.
///
/// # Errors
///
/// - [`EmitError::Write`]: Returned if the record file could not be written.
pub fn write_record(dir: &Path, record: &FormattedRecord) -> Result<WriteOutcome, EmitError> {
    let digest = record.digest();
    let path = dir.join(&digest);
    let write_error = |error| EmitError::Write {
        path: path.clone(),
        error,
    };

    if path.try_exists().map_err(write_error)? {
        log::trace!("{digest} already present");
        return Ok(WriteOutcome::Present);
    }

    let staging = dir.join(format!(".{digest}.tmp"));
    let result = fs::write(&staging, record.as_bytes()).and_then(|()| fs::rename(&staging, &path));
    if let Err(error) = result {
        let _ = fs::remove_file(&staging);
        return Err(write_error(error));
    }

    log::debug!("wrote {digest}: {:?}", record.as_str());
    Ok(WriteOutcome::Written)
}

/// Various errors that can occur while emitting records.
#[derive(Debug)]
pub enum EmitError {
    /// A font requires glyphs but has no [`FontMetadata`][fm].
    ///
    /// [fm]: crate::FontMetadata
    MissingMetadata {
        /// The index of the font.
        font: usize,
    },
    /// A record could not be formatted.
    Format(FormatRecordError),
    /// The output directory could not be created.
    CreateDirectory {
        /// The location of the directory.
        path: PathBuf,
        /// The underlying I/O error.
        error: io::Error,
    },
    /// A record file could not be written.
    Write {
        /// The location of the file.
        path: PathBuf,
        /// The underlying I/O error.
        error: io::Error,
    },
}

impl From<FormatRecordError> for EmitError {
    fn from(value: FormatRecordError) -> Self {
        Self::Format(value)
    }
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMetadata { font } => write!(f, "FONT{font} has no metadata"),
            Self::Format(error) => fmt::Display::fmt(error, f),
            Self::CreateDirectory { path, error } => {
                write!(f, "error creating {}: {error}", path.display())
            }
            Self::Write { path, error } => write!(f, "error writing {}: {error}", path.display()),
        }
    }
}

impl error::Error for EmitError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::MissingMetadata { .. } | Self::Format(_) => None,
            Self::CreateDirectory { error, .. } | Self::Write { error, .. } => Some(error),
        }
    }
}
