//! Resolution of the code points each font must render.
//!
//! Translation documents follow the shape of XLIFF files:
//!
//! ```xml
//! <xliff>
//!     <file>
//!         <body>
//!             <trans-unit name="TITLE">
//!                 <source>Settings</source>
//!                 <target>Réglages</target>
//!             </trans-unit>
//!         </body>
//!     </file>
//! </xliff>
//! ```

use std::{collections::BTreeSet, error, fmt};

use crate::{Position, usage::FontUsage};

/// The code points required by each font.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CodePoints {
    /// The required code points of each font, by index.
    fonts: Box<[BTreeSet<char>]>,
}

impl CodePoints {
    /// Creates a new [`CodePoints`] with no required code points for the fonts `0..font_count`.
    pub fn new(font_count: usize) -> Self {
        Self {
            fonts: vec![BTreeSet::new(); font_count].into_boxed_slice(),
        }
    }

    /// Returns the number of fonts described.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Returns the code points required by `font`, or `None` if `font` is out of range.
    pub fn get(&self, font: usize) -> Option<&BTreeSet<char>> {
        self.fonts.get(font)
    }

    /// Returns the total number of glyphs required across all fonts.
    pub fn glyph_count(&self) -> usize {
        self.fonts.iter().map(BTreeSet::len).sum()
    }

    /// Returns an [`Iterator`] over each font index and the code points it requires.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<char>)> {
        self.fonts.iter().enumerate()
    }

    /// Marks `code_point` as required by `font`, returning `true` if it was not already.
    ///
    /// # Panics
    ///
    /// Panics if `font` is not less than [`CodePoints::font_count()`].
    pub fn insert(&mut self, font: usize, code_point: char) -> bool {
        self.fonts[font].insert(code_point)
    }
}

/// Problems in a translation document that do not prevent resolution.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum CharacterWarning {
    /// A `source` or `target` element has no text.
    EmptyContent {
        /// The name of the enclosing translation unit.
        text_id: String,
        /// The name of the empty element.
        element: &'static str,
        /// The location of the empty element.
        position: Position,
    },
    /// A translation unit names a text identifier that is never displayed.
    UnusedTranslation {
        /// The name of the translation unit.
        text_id: String,
        /// The location of the translation unit.
        position: Position,
    },
}

impl fmt::Display for CharacterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent {
                text_id,
                element,
                position,
            } => write!(f, "empty <{element}> in translation {text_id:?} at {position}"),
            Self::UnusedTranslation { text_id, position } => {
                write!(f, "unused translation {text_id:?} at {position}")
            }
        }
    }
}

/// Adds the code points required by the translation `document` to `code_points`, returning the
/// [`CharacterWarning`]s found along the way.
///
/// Every `source` and `target` of a translation unit contributes its code points to each font
/// that renders the unit's text identifier. Units whose identifier is not in `usage` are
/// reported and skipped.
///
/// # Errors
///
/// - [`ResolveCharactersError::MissingName`]: Returned if a `trans-unit` element has no `name`.
/// - [`ResolveCharactersError::FontCountMismatch`]: Returned if `usage` describes fonts that
///     `code_points` does not.
pub fn resolve_characters(
    usage: &FontUsage,
    document: &roxmltree::Document<'_>,
    code_points: &mut CodePoints,
) -> Result<Vec<CharacterWarning>, ResolveCharactersError> {
    let mut warnings = Vec::new();

    let units = document
        .root_element()
        .descendants()
        .filter(|node| node.has_tag_name("trans-unit"));
    for unit in units {
        resolve_unit(usage, unit, code_points, &mut warnings)?;
    }

    Ok(warnings)
}

/// Adds the code points required by a single `trans-unit` element.
fn resolve_unit(
    usage: &FontUsage,
    unit: roxmltree::Node<'_, '_>,
    code_points: &mut CodePoints,
    warnings: &mut Vec<CharacterWarning>,
) -> Result<(), ResolveCharactersError> {
    let Some(text_id) = unit.attribute("name") else {
        return Err(ResolveCharactersError::MissingName {
            position: Position::of(unit),
        });
    };

    for child in unit.children().filter(roxmltree::Node::is_element) {
        let element = match child.tag_name().name() {
            "source" => "source",
            "target" => "target",
            _ => continue,
        };

        let content = text_content(child);
        if content.is_empty() {
            let warning = CharacterWarning::EmptyContent {
                text_id: text_id.to_owned(),
                element,
                position: Position::of(child),
            };
            log::warn!("{warning}");
            warnings.push(warning);
            continue;
        }

        // Without a usage the remaining children of this unit cannot contribute either.
        let Some(fonts) = usage.get(text_id) else {
            let warning = CharacterWarning::UnusedTranslation {
                text_id: text_id.to_owned(),
                position: Position::of(unit),
            };
            log::warn!("{warning}");
            warnings.push(warning);
            return Ok(());
        };

        if fonts.font_count() > code_points.font_count() {
            return Err(ResolveCharactersError::FontCountMismatch {
                usage: fonts.font_count(),
                code_points: code_points.font_count(),
            });
        }

        for code_point in content.chars() {
            for font in fonts.iter() {
                if code_points.insert(font, code_point) {
                    log::trace!("font {font} requires U+{:04X}", u32::from(code_point));
                }
            }
        }
    }

    Ok(())
}

/// Returns the concatenation of every text node below `node`.
fn text_content(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(roxmltree::Node::is_text)
        .filter_map(|text| text.text())
        .collect()
}

/// Various errors that can occur while resolving required code points.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum ResolveCharactersError {
    /// A `trans-unit` element has no `name` attribute.
    MissingName {
        /// The location of the element.
        position: Position,
    },
    /// The [`FontUsage`] describes more fonts than the [`CodePoints`] being filled.
    FontCountMismatch {
        /// The number of fonts described by the [`FontUsage`].
        usage: usize,
        /// The number of fonts described by the [`CodePoints`].
        code_points: usize,
    },
}

impl fmt::Display for ResolveCharactersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName { position } => {
                write!(f, "translation unit at {position} has no name")
            }
            Self::FontCountMismatch { usage, code_points } => write!(
                f,
                "font usage describes {usage} fonts but only {code_points} can be resolved"
            ),
        }
    }
}

impl error::Error for ResolveCharactersError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::resolve_font_usage;

    const SCREENS: &str = r#"<screens><screen>
        <text value="T0" font="0"/>
        <text value="T1" font="1"/>
        <text value="SHARED" font="0"/>
        <text value="SHARED" font="2"/>
    </screen></screens>"#;

    fn resolve(translations: &str) -> (CodePoints, Vec<CharacterWarning>) {
        let screens = roxmltree::Document::parse(SCREENS).unwrap();
        let usage = resolve_font_usage(&screens, 3).unwrap();

        let document = roxmltree::Document::parse(translations).unwrap();
        let mut code_points = CodePoints::new(3);
        let warnings = resolve_characters(&usage, &document, &mut code_points).unwrap();
        (code_points, warnings)
    }

    fn chars(code_points: &CodePoints, font: usize) -> String {
        code_points.get(font).unwrap().iter().collect()
    }

    #[test]
    fn decodes_multibyte_code_points() {
        let (code_points, warnings) =
            resolve(r#"<xliff><trans-unit name="T1"><source>é</source></trans-unit></xliff>"#);

        assert!(warnings.is_empty());
        assert!(code_points.get(1).unwrap().contains(&'\u{E9}'));
        assert!(code_points.get(0).unwrap().is_empty());
        assert!(code_points.get(2).unwrap().is_empty());
    }

    #[test]
    fn source_and_target_both_contribute() {
        let (code_points, _) = resolve(
            r#"<xliff><file><body>
                <trans-unit name="T0">
                    <source>ab</source>
                    <target>bc</target>
                </trans-unit>
            </body></file></xliff>"#,
        );

        assert_eq!(chars(&code_points, 0), "abc");
    }

    #[test]
    fn shared_text_fans_out_to_every_font() {
        let (code_points, _) = resolve(
            r#"<xliff><trans-unit name="SHARED"><source>xy</source></trans-unit></xliff>"#,
        );

        assert_eq!(chars(&code_points, 0), "xy");
        assert_eq!(chars(&code_points, 1), "");
        assert_eq!(chars(&code_points, 2), "xy");
        assert_eq!(code_points.glyph_count(), 4);
    }

    #[test]
    fn repeated_text_does_not_grow_sets() {
        let once = r#"<xliff><trans-unit name="T0"><source>hello</source></trans-unit></xliff>"#;
        let twice = r#"<xliff>
            <trans-unit name="T0"><source>hello</source><target>hello</target></trans-unit>
            <trans-unit name="T0"><source>hello</source></trans-unit>
        </xliff>"#;

        let (once, _) = resolve(once);
        let (twice, _) = resolve(twice);
        assert_eq!(once, twice);
        assert_eq!(once.get(0).unwrap().len(), 4);
    }

    #[test]
    fn resolving_accumulates_across_documents() {
        let screens = roxmltree::Document::parse(SCREENS).unwrap();
        let usage = resolve_font_usage(&screens, 3).unwrap();
        let mut code_points = CodePoints::new(3);

        for xml in [
            r#"<xliff><trans-unit name="T0"><source>a</source></trans-unit></xliff>"#,
            r#"<xliff><trans-unit name="T0"><target>ä</target></trans-unit></xliff>"#,
        ] {
            let document = roxmltree::Document::parse(xml).unwrap();
            resolve_characters(&usage, &document, &mut code_points).unwrap();
        }

        assert_eq!(chars(&code_points, 0), "aä");
    }

    #[test]
    fn text_content_is_concatenated() {
        let (code_points, _) = resolve(concat!(
            r#"<xliff><trans-unit name="T0">"#,
            "<source>a<g>b</g>&amp;<![CDATA[c]]></source>",
            "</trans-unit></xliff>",
        ));

        assert_eq!(chars(&code_points, 0), "&abc");
    }

    #[test]
    fn empty_content_warns_and_continues() {
        let (code_points, warnings) = resolve(
            r#"<xliff><trans-unit name="T0"><source/><target>z</target></trans-unit></xliff>"#,
        );

        assert_eq!(chars(&code_points, 0), "z");
        assert!(matches!(
            warnings.as_slice(),
            [CharacterWarning::EmptyContent { element: "source", .. }]
        ));
    }

    #[test]
    fn unused_translation_skips_rest_of_unit() {
        let (code_points, warnings) = resolve(
            r#"<xliff>
                <trans-unit name="NOWHERE"><source>a</source><target>b</target></trans-unit>
                <trans-unit name="T1"><source>c</source></trans-unit>
            </xliff>"#,
        );

        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            CharacterWarning::UnusedTranslation { text_id, .. } if text_id == "NOWHERE"
        ));
        assert_eq!(chars(&code_points, 1), "c");
        assert_eq!(code_points.glyph_count(), 1);
    }

    #[test]
    fn unnamed_unit_fails() {
        let screens = roxmltree::Document::parse(SCREENS).unwrap();
        let usage = resolve_font_usage(&screens, 3).unwrap();
        let document =
            roxmltree::Document::parse("<xliff><trans-unit><source>a</source></trans-unit></xliff>")
                .unwrap();

        let error = resolve_characters(&usage, &document, &mut CodePoints::new(3)).unwrap_err();
        assert!(matches!(error, ResolveCharactersError::MissingName { .. }));
    }

    #[test]
    fn mismatched_font_count_fails() {
        let screens = roxmltree::Document::parse(SCREENS).unwrap();
        let usage = resolve_font_usage(&screens, 3).unwrap();
        let document = roxmltree::Document::parse(
            r#"<xliff><trans-unit name="T0"><source>a</source></trans-unit></xliff>"#,
        )
        .unwrap();

        let error = resolve_characters(&usage, &document, &mut CodePoints::new(2)).unwrap_err();
        assert_eq!(
            error,
            ResolveCharactersError::FontCountMismatch {
                usage: 3,
                code_points: 2
            }
        );
    }
}
