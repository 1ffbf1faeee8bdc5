//! Loading of the XML documents consumed by the pipeline.

use std::{
    error, fmt, fs, io,
    path::{Path, PathBuf},
};

/// The raw text of an XML document along with where it was loaded from.
///
/// [`roxmltree::Document`]s borrow the text they were parsed from, so a [`DocumentSource`] must
/// outlive every document parsed from it.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DocumentSource {
    /// The location the document was loaded from, used in error messages.
    path: PathBuf,
    /// The UTF-8 decoded contents of the document.
    text: String,
}

impl DocumentSource {
    /// Reads the document at `path`.
    ///
    /// # Errors
    ///
    /// - [`LoadDocumentError::Io`]: Returned if the document could not be read.
    /// - [`LoadDocumentError::InvalidUtf8`]: Returned if the document is not valid UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadDocumentError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|error| LoadDocumentError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        Self::from_bytes(path, bytes)
    }

    /// Creates a new [`DocumentSource`] from the raw `bytes` of a document.
    ///
    /// # Errors
    ///
    /// - [`LoadDocumentError::InvalidUtf8`]: Returned if `bytes` is not valid UTF-8.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self, LoadDocumentError> {
        let path = path.into();
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Self { path, text }),
            Err(error) => Err(LoadDocumentError::InvalidUtf8 {
                path,
                valid_up_to: error.utf8_error().valid_up_to(),
            }),
        }
    }

    /// Creates a new [`DocumentSource`] from already decoded `text`.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Returns the location this document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the text of this document as XML.
    ///
    /// Document type declarations are permitted, since exported UI descriptions commonly carry
    /// one, but they are never validated against.
    ///
    /// # Errors
    ///
    /// - [`LoadDocumentError::Malformed`]: Returned if the text is not well-formed XML or has no
    ///     root element.
    pub fn parse(&self) -> Result<roxmltree::Document<'_>, LoadDocumentError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };

        roxmltree::Document::parse_with_options(&self.text, options).map_err(|error| {
            LoadDocumentError::Malformed {
                path: self.path.clone(),
                error,
            }
        })
    }
}

/// Various errors that can occur while loading a document.
#[derive(Debug)]
pub enum LoadDocumentError {
    /// An error occurred while reading the document.
    Io {
        /// The location of the document.
        path: PathBuf,
        /// The underlying I/O error.
        error: io::Error,
    },
    /// The document contains an invalid UTF-8 byte sequence.
    InvalidUtf8 {
        /// The location of the document.
        path: PathBuf,
        /// The number of bytes that were valid before the invalid sequence.
        valid_up_to: usize,
    },
    /// The document is not well-formed XML.
    Malformed {
        /// The location of the document.
        path: PathBuf,
        /// The error reported by the XML parser.
        error: roxmltree::Error,
    },
}

impl fmt::Display for LoadDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, error } => write!(f, "error reading {}: {error}", path.display()),
            Self::InvalidUtf8 { path, valid_up_to } => write!(
                f,
                "{} contains an invalid UTF-8 sequence at byte {valid_up_to}",
                path.display()
            ),
            Self::Malformed { path, error } => {
                write!(f, "{} is not well-formed XML: {error}", path.display())
            }
        }
    }
}

impl error::Error for LoadDocumentError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            Self::InvalidUtf8 { .. } => None,
            Self::Malformed { error, .. } => Some(error),
        }
    }
}
