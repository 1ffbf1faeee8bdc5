//! Resolution of which fonts render each text identifier.
//!
//! Screen documents have the following shape:
//!
//! ```xml
//! <screens>
//!     <screen name="main">
//!         <text value="TITLE" font="0"/>
//!         <variable_region>
//!             <text value="SUBTITLE" font="1"/>
//!         </variable_region>
//!     </screen>
//! </screens>
//! ```

use std::{collections::BTreeMap, error, fmt};

use crate::Position;

/// The set of fonts that render a text identifier.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontSet {
    /// Whether each font, by index, is part of the set.
    fonts: Box<[bool]>,
}

impl FontSet {
    /// Creates an empty [`FontSet`] able to hold the indices `0..font_count`.
    pub fn new(font_count: usize) -> Self {
        Self {
            fonts: vec![false; font_count].into_boxed_slice(),
        }
    }

    /// Adds `font` to the set.
    ///
    /// # Panics
    ///
    /// Panics if `font` is not less than [`FontSet::font_count()`].
    pub fn insert(&mut self, font: usize) {
        self.fonts[font] = true;
    }

    /// Returns `true` if `font` is part of the set.
    pub fn contains(&self, font: usize) -> bool {
        self.fonts.get(font).copied().unwrap_or(false)
    }

    /// Returns `true` if no font is part of the set.
    pub fn is_empty(&self) -> bool {
        !self.fonts.contains(&true)
    }

    /// Returns the number of fonts this set can describe.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Returns an [`Iterator`] over the indices of the fonts in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.fonts
            .iter()
            .enumerate()
            .filter_map(|(font, &used)| used.then_some(font))
    }
}

/// Mapping from text identifier to the [`FontSet`] that renders it.
///
/// Every [`FontSet`] in a [`FontUsage`] contains at least one font.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct FontUsage {
    /// The [`FontSet`] of each text identifier.
    usages: BTreeMap<String, FontSet>,
}

impl FontUsage {
    /// Returns the [`FontSet`] of `text_id`, or `None` if the identifier is never displayed.
    pub fn get(&self, text_id: &str) -> Option<&FontSet> {
        self.usages.get(text_id)
    }

    /// Returns the number of text identifiers with a recorded usage.
    pub fn len(&self) -> usize {
        self.usages.len()
    }

    /// Returns `true` if no text identifier has a recorded usage.
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Returns an [`Iterator`] over every text identifier and its [`FontSet`], ordered by
    /// identifier.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FontSet)> {
        self.usages
            .iter()
            .map(|(text_id, fonts)| (text_id.as_str(), fonts))
    }

    /// Records that `text_id` is rendered in `font`.
    fn record(&mut self, text_id: &str, font: usize, font_count: usize) {
        match self.usages.get_mut(text_id) {
            Some(fonts) => fonts.insert(font),
            None => {
                let mut fonts = FontSet::new(font_count);
                fonts.insert(font);
                self.usages.insert(text_id.to_owned(), fonts);
            }
        }
    }
}

/// The kinds of elements that make up a screen document.
#[derive(Clone, Copy, Debug)]
enum ScreenElement<'a, 'input> {
    /// A single screen.
    Screen(roxmltree::Node<'a, 'input>),
    /// A region whose contents are conditionally displayed.
    VariableRegion(roxmltree::Node<'a, 'input>),
    /// A piece of displayed text.
    Text(roxmltree::Node<'a, 'input>),
}

impl<'a, 'input> ScreenElement<'a, 'input> {
    /// Classifies `node`, returning `None` for nodes that do not affect font usage.
    fn classify(node: roxmltree::Node<'a, 'input>) -> Option<Self> {
        if !node.is_element() {
            return None;
        }

        match node.tag_name().name() {
            "screen" => Some(Self::Screen(node)),
            "variable_region" => Some(Self::VariableRegion(node)),
            "text" => Some(Self::Text(node)),
            _ => None,
        }
    }
}

/// Builds the [`FontUsage`] described by the screen `document`, where valid font indices are
/// `0..font_count`.
///
/// # Errors
///
/// - [`ResolveUsageError::MissingFont`]: Returned if a `text` element with a `value` has no
///     `font` attribute.
/// - [`ResolveUsageError::InvalidFont`]: Returned if a `font` attribute is not an integer in
///     `0..font_count`.
pub fn resolve_font_usage(
    document: &roxmltree::Document<'_>,
    font_count: usize,
) -> Result<FontUsage, ResolveUsageError> {
    let mut usage = FontUsage::default();

    for child in document.root_element().children() {
        if let Some(ScreenElement::Screen(screen)) = ScreenElement::classify(child) {
            log::trace!("reading screen {:?}", screen.attribute("name").unwrap_or(""));
            visit_children(&mut usage, screen, font_count)?;
        }
    }

    log::info!("found {} displayed text identifiers", usage.len());
    Ok(usage)
}

/// Records the usages found in the children of `parent`, descending into variable regions.
fn visit_children(
    usage: &mut FontUsage,
    parent: roxmltree::Node<'_, '_>,
    font_count: usize,
) -> Result<(), ResolveUsageError> {
    for child in parent.children() {
        match ScreenElement::classify(child) {
            Some(ScreenElement::VariableRegion(region)) => {
                visit_children(usage, region, font_count)?
            }
            Some(ScreenElement::Text(text)) => visit_text(usage, text, font_count)?,
            Some(ScreenElement::Screen(_)) | None => {}
        }
    }

    Ok(())
}

/// Records the usage described by a `text` element.
fn visit_text(
    usage: &mut FontUsage,
    text: roxmltree::Node<'_, '_>,
    font_count: usize,
) -> Result<(), ResolveUsageError> {
    // Only `text` elements with a `value` name a piece of text.
    let Some(text_id) = text.attribute("value") else {
        return Ok(());
    };

    let Some(font) = text.attribute("font") else {
        return Err(ResolveUsageError::MissingFont {
            text_id: text_id.to_owned(),
            position: Position::of(text),
        });
    };

    let font = parse_font_index(font, font_count).ok_or_else(|| ResolveUsageError::InvalidFont {
        text_id: text_id.to_owned(),
        font: font.to_owned(),
        font_count,
        position: Position::of(text),
    })?;

    usage.record(text_id, font, font_count);
    Ok(())
}

/// Parses a decimal font index, returning `None` if it is not in `0..font_count`.
fn parse_font_index(font: &str, font_count: usize) -> Option<usize> {
    if font.is_empty() || !font.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    font.parse::<usize>()
        .ok()
        .filter(|&font| font < font_count)
}

/// Various errors that can occur while resolving font usage.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum ResolveUsageError {
    /// A `text` element names a text identifier but not the font it is rendered in.
    MissingFont {
        /// The text identifier of the element.
        text_id: String,
        /// The location of the element.
        position: Position,
    },
    /// A `text` element's font is not a valid font index.
    InvalidFont {
        /// The text identifier of the element.
        text_id: String,
        /// The value of the `font` attribute.
        font: String,
        /// The number of fonts.
        font_count: usize,
        /// The location of the element.
        position: Position,
    },
}

impl fmt::Display for ResolveUsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFont { text_id, position } => {
                write!(f, "text {text_id:?} at {position} has no font")
            }
            Self::InvalidFont {
                text_id,
                font,
                font_count,
                position,
            } => write!(
                f,
                "text {text_id:?} at {position} uses font {font:?}, expected an index below {font_count}"
            ),
        }
    }
}

impl error::Error for ResolveUsageError {}
