//! Limits shared by every stage of the pipeline.

/// The number of bitmap fonts used when none is configured.
pub const DEFAULT_FONT_COUNT: usize = 3;

/// The longest typeface path, in bytes, accepted when none is configured.
pub const DEFAULT_MAX_PATH_LEN: usize = 255;

/// The longest formatted [`SpecRecord`][sr], in bytes, accepted when none is configured.
///
/// [sr]: crate::SpecRecord
pub const DEFAULT_MAX_RECORD_LEN: usize = 512;

/// Limits controlling resolution and emission.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Config {
    /// The number of fonts. Valid font indices are `0..font_count`.
    pub font_count: usize,
    /// The longest typeface path, in bytes, a font may declare.
    pub max_path_len: usize,
    /// The longest formatted record, in bytes, that may be emitted.
    pub max_record_len: usize,
}

impl Config {
    /// Returns a [`Config`] using the default limits with `font_count` fonts.
    pub const fn with_font_count(font_count: usize) -> Self {
        Self {
            font_count,
            max_path_len: DEFAULT_MAX_PATH_LEN,
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_font_count(DEFAULT_FONT_COUNT)
    }
}
