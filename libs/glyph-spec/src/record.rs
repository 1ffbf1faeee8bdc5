//! Glyph specification records and their content addresses.

use std::{error, fmt};

use crate::metadata::FontMetadata;

/// Description of how to render a single code point in a single font.
///
/// The canonical form of a record is a single tab separated line:
///
/// ```text
/// <code point>\t<path>\t<size>\t<width>\t<height>\t<x>\t<y>\n
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecRecord<'font> {
    /// The code point to render.
    pub code_point: char,
    /// The font in which to render it.
    pub font: &'font FontMetadata,
}

impl<'font> SpecRecord<'font> {
    /// Creates a new [`SpecRecord`].
    pub const fn new(code_point: char, font: &'font FontMetadata) -> Self {
        Self { code_point, font }
    }

    /// Returns the canonical form of this [`SpecRecord`].
    ///
    /// # Errors
    ///
    /// - [`FormatRecordError::TooLong`]: Returned if the canonical form is longer than `max_len`
    ///     bytes.
    pub fn format(&self, max_len: usize) -> Result<FormattedRecord, FormatRecordError> {
        let line = self.to_string();
        if line.len() > max_len {
            return Err(FormatRecordError::TooLong {
                code_point: self.code_point,
                len: line.len(),
                max: max_len,
            });
        }

        Ok(FormattedRecord { line })
    }
}

impl fmt::Display for SpecRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FontMetadata {
            path,
            size,
            width,
            height,
            x,
            y,
        } = self.font;

        writeln!(
            f,
            "{}\t{path}\t{size}\t{width}\t{height}\t{x}\t{y}",
            u32::from(self.code_point)
        )
    }
}

/// The canonical form of a [`SpecRecord`].
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FormattedRecord {
    /// The newline terminated record.
    line: String,
}

impl FormattedRecord {
    /// Returns the bytes of the record.
    pub fn as_bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Returns the record as a [`str`].
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Returns the lowercase hexadecimal MD5 digest of the record, which names the file it is
    /// stored in.
    pub fn digest(&self) -> String {
        format!("{:x}", md5::compute(self.as_bytes()))
    }
}

/// Various errors that can occur while formatting a [`SpecRecord`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum FormatRecordError {
    /// The canonical form of the record is longer than permitted.
    TooLong {
        /// The code point of the record.
        code_point: char,
        /// The length of the canonical form in bytes.
        len: usize,
        /// The longest permitted canonical form in bytes.
        max: usize,
    },
}

impl fmt::Display for FormatRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong {
                code_point,
                len,
                max,
            } => write!(
                f,
                "record for U+{:04X} is {len} bytes long, the limit is {max} bytes",
                u32::from(*code_point)
            ),
        }
    }
}

impl error::Error for FormatRecordError {}
