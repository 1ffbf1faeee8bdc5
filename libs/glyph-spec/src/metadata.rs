//! Loading of the rendering parameters of each font.
//!
//! Physical attributes documents have the following shape:
//!
//! ```xml
//! <PhysicalAttributes>
//!     <Fonts>
//!         <Font Name="FONT0" TrueTypeLib="fonts/arial.ttf"
//!               Size="12" Width="8" Height="10" StartX="0" StartY="0"/>
//!     </Fonts>
//! </PhysicalAttributes>
//! ```

use std::{error, fmt};

use crate::{Position, config::Config};

/// The rendering parameters of a single font.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontMetadata {
    /// The location of the backing typeface.
    pub path: String,
    /// The point size at which glyphs are rendered.
    pub size: u32,
    /// The width of a glyph cell in pixels.
    pub width: u32,
    /// The height of a glyph cell in pixels.
    pub height: u32,
    /// The horizontal origin of the font within its atlas.
    pub x: u32,
    /// The vertical origin of the font within its atlas.
    pub y: u32,
}

/// The [`FontMetadata`] of every font, indexed by font index.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontTable {
    /// The [`FontMetadata`] of each font.
    fonts: Box<[FontMetadata]>,
}

impl FontTable {
    /// Returns the [`FontMetadata`] of `font`, or `None` if `font` is out of range.
    pub fn get(&self, font: usize) -> Option<&FontMetadata> {
        self.fonts.get(font)
    }

    /// Returns the number of fonts in the table.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Returns an [`Iterator`] over each font index and its [`FontMetadata`].
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FontMetadata)> {
        self.fonts.iter().enumerate()
    }
}

impl FromIterator<FontMetadata> for FontTable {
    fn from_iter<T: IntoIterator<Item = FontMetadata>>(iter: T) -> Self {
        Self {
            fonts: iter.into_iter().collect(),
        }
    }
}

/// Loads the [`FontTable`] described by the physical attributes `document`.
///
/// `Font` entries may appear in any order, and a later entry for the same font replaces an
/// earlier one, but every font in `0..config.font_count` must be described.
///
/// # Errors
///
/// - [`LoadMetadataError::MissingFonts`]: Returned if the document has no `Fonts` element.
/// - [`LoadMetadataError::MissingAttribute`]: Returned if a `Font` lacks a required attribute.
/// - [`LoadMetadataError::InvalidNumber`]: Returned if a numeric attribute is not an unsigned
///     decimal integer.
/// - [`LoadMetadataError::InvalidName`]: Returned if a `Name` does not match `FONT<n>`.
/// - [`LoadMetadataError::FontOutOfRange`]: Returned if a font index is not in
///     `0..config.font_count`.
/// - [`LoadMetadataError::PathTooLong`]: Returned if a `TrueTypeLib` is longer than
///     `config.max_path_len`.
/// - [`LoadMetadataError::UndefinedFont`]: Returned if a font in `0..config.font_count` is never
///     described.
pub fn load_font_metadata(
    document: &roxmltree::Document<'_>,
    config: &Config,
) -> Result<FontTable, LoadMetadataError> {
    let Some(fonts) = document
        .root_element()
        .descendants()
        .find(|node| node.has_tag_name("Fonts"))
    else {
        return Err(LoadMetadataError::MissingFonts);
    };

    let mut slots = vec![None; config.font_count];
    for font in fonts.children().filter(|node| node.has_tag_name("Font")) {
        let (index, metadata) = read_font(font, config)?;
        if slots[index].replace(metadata).is_some() {
            log::debug!("FONT{index} is described more than once, using the last description");
        }
    }

    let table = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(LoadMetadataError::UndefinedFont { index }))
        .collect::<Result<FontTable, _>>()?;

    for (index, metadata) in table.iter() {
        log::debug!("FONT{index}: {metadata:?}");
    }
    Ok(table)
}

/// Reads a single `Font` element, returning its font index and [`FontMetadata`].
fn read_font(
    font: roxmltree::Node<'_, '_>,
    config: &Config,
) -> Result<(usize, FontMetadata), LoadMetadataError> {
    let position = Position::of(font);
    let attribute = |name: &'static str| {
        font.attribute(name)
            .ok_or(LoadMetadataError::MissingAttribute {
                attribute: name,
                position,
            })
    };
    let number = |name: &'static str| -> Result<u32, LoadMetadataError> {
        let value = attribute(name)?;
        parse_unsigned(value).ok_or_else(|| LoadMetadataError::InvalidNumber {
            attribute: name,
            value: value.to_owned(),
            position,
        })
    };

    let size = number("Size")?;
    let width = number("Width")?;
    let height = number("Height")?;
    let x = number("StartX")?;
    let y = number("StartY")?;

    let name = attribute("Name")?;
    let index = parse_font_name(name).ok_or_else(|| LoadMetadataError::InvalidName {
        name: name.to_owned(),
        position,
    })?;
    if index >= config.font_count {
        return Err(LoadMetadataError::FontOutOfRange {
            name: name.to_owned(),
            font_count: config.font_count,
        });
    }

    // An empty path is permitted, an absent one is not.
    let path = attribute("TrueTypeLib")?;
    if path.len() > config.max_path_len {
        return Err(LoadMetadataError::PathTooLong {
            name: name.to_owned(),
            len: path.len(),
            max: config.max_path_len,
        });
    }

    let metadata = FontMetadata {
        path: path.to_owned(),
        size,
        width,
        height,
        x,
        y,
    };
    Ok((index, metadata))
}

/// Parses an unsigned decimal integer made up of only ASCII digits.
fn parse_unsigned(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    value.parse().ok()
}

/// Parses the font index out of a name of the form `FONT<n>`.
fn parse_font_name(name: &str) -> Option<usize> {
    let index = name.strip_prefix("FONT")?;
    if index.is_empty() || !index.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    index.parse().ok()
}

/// Various errors that can occur while loading font metadata.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum LoadMetadataError {
    /// The document has no `Fonts` element.
    MissingFonts,
    /// A `Font` element lacks a required attribute.
    MissingAttribute {
        /// The name of the missing attribute.
        attribute: &'static str,
        /// The location of the element.
        position: Position,
    },
    /// A numeric attribute is not an unsigned decimal integer.
    InvalidNumber {
        /// The name of the attribute.
        attribute: &'static str,
        /// The value of the attribute.
        value: String,
        /// The location of the element.
        position: Position,
    },
    /// A `Name` attribute does not match `FONT<n>`.
    InvalidName {
        /// The value of the attribute.
        name: String,
        /// The location of the element.
        position: Position,
    },
    /// A font index is outside of the configured range.
    FontOutOfRange {
        /// The name of the font.
        name: String,
        /// The number of fonts.
        font_count: usize,
    },
    /// A typeface path is longer than permitted.
    PathTooLong {
        /// The name of the font.
        name: String,
        /// The length of the path in bytes.
        len: usize,
        /// The longest permitted path in bytes.
        max: usize,
    },
    /// A font in the configured range is never described.
    UndefinedFont {
        /// The index of the font.
        index: usize,
    },
}

impl fmt::Display for LoadMetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFonts => f.pad("no <Fonts> element"),
            Self::MissingAttribute {
                attribute,
                position,
            } => write!(f, "font at {position} has no {attribute} attribute"),
            Self::InvalidNumber {
                attribute,
                value,
                position,
            } => write!(
                f,
                "font at {position} has {attribute}={value:?}, expected an unsigned integer"
            ),
            Self::InvalidName { name, position } => write!(
                f,
                "font at {position} is named {name:?}, expected FONT<n>"
            ),
            Self::FontOutOfRange { name, font_count } => write!(
                f,
                "{name} is out of range, expected an index below {font_count}"
            ),
            Self::PathTooLong { name, len, max } => write!(
                f,
                "{name} has a {len} byte typeface path, the limit is {max} bytes"
            ),
            Self::UndefinedFont { index } => write!(f, "FONT{index} is not defined"),
        }
    }
}

impl error::Error for LoadMetadataError {}
