//! The `glyph-spec` crate determines which glyphs each bitmap font must render and describes how
//! each of those glyphs should be rasterized.
//!
//! # Pipeline
//!
//! Resolution happens in stages, each of which fully completes before the next begins:
//!
//! 1. [`usage`]: walks a screen document and records which fonts render each text identifier.
//! 2. [`characters`]: walks translation documents and accumulates, per font, the code points
//!    required by the translated text of every identifier that font renders.
//! 3. [`metadata`]: loads the rendering parameters of every font from a physical attributes
//!    document.
//! 4. [`emit`]: writes one content-addressed [`SpecRecord`] file per required glyph.
//!
//! [`pipeline`] ties the stages together and [`Config`] controls the limits they enforce.
//!
//! ## Idempotent Output
//!
//! Every record is stored under the MD5 digest of its own content, so re-running the pipeline
//! against an existing output directory only adds the files that are missing.

use core::fmt;

pub mod characters;
pub mod config;
pub mod document;
pub mod emit;
pub mod metadata;
pub mod pipeline;
pub mod record;
pub mod usage;

pub use characters::{CharacterWarning, CodePoints};
pub use config::Config;
pub use emit::EmitSummary;
pub use metadata::{FontMetadata, FontTable};
pub use pipeline::{Inputs, Report};
pub use record::SpecRecord;
pub use usage::{FontSet, FontUsage};

/// Position of a node within a parsed document.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// The 1-based line of the node.
    pub row: u32,
    /// The 1-based column of the node.
    pub col: u32,
}

impl Position {
    /// Returns the [`Position`] at which `node` starts.
    pub(crate) fn of(node: roxmltree::Node<'_, '_>) -> Self {
        let pos = node.document().text_pos_at(node.range().start);
        Self {
            row: pos.row,
            col: pos.col,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}
