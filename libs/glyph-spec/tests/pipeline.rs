//! End-to-end runs of the glyph resolution pipeline against scratch directories.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glyph_spec::{
    CharacterWarning, Config, EmitSummary, Inputs,
    pipeline::{self, PipelineError},
    usage::ResolveUsageError,
};
use pretty_assertions::assert_eq;

const SCREENS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<screens>
    <screen name="main">
        <text value="T1" font="0"/>
    </screen>
</screens>
"#;

const TRANSLATIONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff>
    <trans-unit name="T1">
        <source>A</source>
    </trans-unit>
</xliff>
"#;

const ATTRIBUTES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PhysicalAttributes>
    <Fonts>
        <Font Name="FONT0" TrueTypeLib="arial.ttf" Size="12" Width="8" Height="10" StartX="0" StartY="0"/>
        <Font Name="FONT1" TrueTypeLib="arial.ttf" Size="16" Width="10" Height="14" StartX="0" StartY="10"/>
        <Font Name="FONT2" TrueTypeLib="mono.ttf" Size="8" Width="6" Height="8" StartX="0" StartY="24"/>
    </Fonts>
</PhysicalAttributes>
"#;

/// A scratch directory holding the input documents of a pipeline run.
struct Fixture {
    dir: tempfile::TempDir,
    inputs: Inputs,
}

impl Fixture {
    fn new(screens: &str, translations: &[&str], attributes: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir().unwrap();
        let write = |name: String, contents: &str| {
            let path = dir.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        };

        let inputs = Inputs {
            screens: write("screens.xml".to_owned(), screens),
            translations: translations
                .iter()
                .enumerate()
                .map(|(index, &contents)| write(format!("translations-{index}.xml"), contents))
                .collect(),
            attributes: write("attributes.xml".to_owned(), attributes),
        };

        Self { dir, inputs }
    }

    fn output(&self) -> PathBuf {
        self.dir.path().join("specs")
    }

    fn run(&self) -> Result<glyph_spec::Report, PipelineError> {
        pipeline::run(&self.inputs, &self.output(), &Config::default())
    }
}

/// Returns the name and contents of every file in `dir`, ordered by name.
fn read_specs(dir: &Path) -> Vec<(String, String)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut specs = entries
        .map(|entry| {
            let entry = entry.unwrap();
            let name = entry.file_name().into_string().unwrap();
            (name, fs::read_to_string(entry.path()).unwrap())
        })
        .collect::<Vec<_>>();
    specs.sort();
    specs
}

fn md5_hex(contents: &str) -> String {
    format!("{:x}", md5::compute(contents))
}

#[test]
fn single_glyph_end_to_end() {
    let fixture = Fixture::new(SCREENS, &[TRANSLATIONS], ATTRIBUTES);

    let report = fixture.run().unwrap();

    let record = "65\tarial.ttf\t12\t8\t10\t0\t0\n";
    assert_eq!(
        read_specs(&fixture.output()),
        [(md5_hex(record), record.to_owned())]
    );
    assert_eq!(report.text_ids, 1);
    assert_eq!(report.glyphs, 1);
    assert!(report.warnings.is_empty());
    assert_eq!(
        report.summary,
        EmitSummary {
            written: 1,
            present: 0
        }
    );
}

#[test]
fn rerun_writes_nothing_new() {
    let fixture = Fixture::new(SCREENS, &[TRANSLATIONS], ATTRIBUTES);

    fixture.run().unwrap();
    let before = read_specs(&fixture.output());
    let report = fixture.run().unwrap();

    assert_eq!(read_specs(&fixture.output()), before);
    assert_eq!(
        report.summary,
        EmitSummary {
            written: 0,
            present: 1
        }
    );
}

#[test]
fn existing_unrelated_files_are_kept() {
    let fixture = Fixture::new(SCREENS, &[TRANSLATIONS], ATTRIBUTES);
    fs::create_dir_all(fixture.output()).unwrap();
    fs::write(fixture.output().join("previous"), "kept").unwrap();

    fixture.run().unwrap();

    let specs = read_specs(&fixture.output());
    assert_eq!(specs.len(), 2);
    assert!(specs.contains(&("previous".to_owned(), "kept".to_owned())));
}

#[test]
fn glyphs_fan_out_across_fonts_and_documents() {
    let screens = r#"<screens>
        <screen name="a">
            <text value="TITLE" font="0"/>
            <variable_region>
                <text value="TITLE" font="2"/>
                <text value="HINT" font="1"/>
            </variable_region>
        </screen>
    </screens>"#;
    let english = r#"<xliff><file><body>
        <trans-unit name="TITLE"><source>ab</source><target>ab</target></trans-unit>
        <trans-unit name="HINT"><source>é</source></trans-unit>
    </body></file></xliff>"#;
    let french = r#"<xliff><file><body>
        <trans-unit name="TITLE"><source>ab</source><target>bà</target></trans-unit>
    </body></file></xliff>"#;
    let fixture = Fixture::new(screens, &[english, french], ATTRIBUTES);

    let report = fixture.run().unwrap();

    let expected = [
        "97\tarial.ttf\t12\t8\t10\t0\t0\n",
        "98\tarial.ttf\t12\t8\t10\t0\t0\n",
        "224\tarial.ttf\t12\t8\t10\t0\t0\n",
        "233\tarial.ttf\t16\t10\t14\t0\t10\n",
        "97\tmono.ttf\t8\t6\t8\t0\t24\n",
        "98\tmono.ttf\t8\t6\t8\t0\t24\n",
        "224\tmono.ttf\t8\t6\t8\t0\t24\n",
    ];
    let mut expected = expected
        .into_iter()
        .map(|record| (md5_hex(record), record.to_owned()))
        .collect::<Vec<_>>();
    expected.sort();

    assert_eq!(read_specs(&fixture.output()), expected);
    assert_eq!(report.glyphs, 7);
    assert_eq!(report.summary.total(), 7);
}

#[test]
fn unknown_text_id_warns_and_completes() {
    let translations = r#"<xliff>
        <trans-unit name="GONE"><source>Z</source></trans-unit>
        <trans-unit name="T1"><source>A</source></trans-unit>
    </xliff>"#;
    let fixture = Fixture::new(SCREENS, &[translations], ATTRIBUTES);

    let report = fixture.run().unwrap();

    assert!(matches!(
        report.warnings.as_slice(),
        [CharacterWarning::UnusedTranslation { text_id, .. }] if text_id == "GONE"
    ));
    assert_eq!(read_specs(&fixture.output()).len(), 1);
}

#[test]
fn missing_font_index_writes_nothing() {
    let screens = r#"<screens><screen>
        <text value="T1" font="0"/>
        <text value="T2"/>
    </screen></screens>"#;
    let fixture = Fixture::new(screens, &[TRANSLATIONS], ATTRIBUTES);

    let error = fixture.run().unwrap_err();

    assert!(matches!(
        &error,
        PipelineError::Usage {
            path,
            error: ResolveUsageError::MissingFont { .. },
        } if *path == fixture.inputs.screens
    ));
    assert!(!fixture.output().exists());
}

#[test]
fn invalid_attributes_write_nothing() {
    let attributes = ATTRIBUTES.replace(r#"Name="FONT2""#, r#"Name="FONT9""#);
    let fixture = Fixture::new(SCREENS, &[TRANSLATIONS], &attributes);

    assert!(matches!(
        fixture.run(),
        Err(PipelineError::Metadata { .. })
    ));
    assert!(!fixture.output().exists());
}

#[test]
fn malformed_translation_writes_nothing() {
    let fixture = Fixture::new(SCREENS, &[TRANSLATIONS, "<xliff><trans-unit>"], ATTRIBUTES);

    assert!(matches!(fixture.run(), Err(PipelineError::Document(_))));
    assert!(!fixture.output().exists());
}

#[test]
fn invalid_utf8_translation_fails() {
    let fixture = Fixture::new(SCREENS, &[], ATTRIBUTES);
    let path = fixture.dir.path().join("latin1.xml");
    fs::write(
        &path,
        b"<xliff><trans-unit name=\"T1\"><source>caf\xE9</source></trans-unit></xliff>",
    )
    .unwrap();
    let inputs = Inputs {
        translations: vec![path],
        ..fixture.inputs.clone()
    };

    let error = pipeline::run(&inputs, &fixture.output(), &Config::default()).unwrap_err();

    assert!(error.to_string().contains("invalid UTF-8"));
    assert!(!fixture.output().exists());
}

#[test]
fn missing_document_fails() {
    let fixture = Fixture::new(SCREENS, &[TRANSLATIONS], ATTRIBUTES);
    let inputs = Inputs {
        attributes: fixture.dir.path().join("nope.xml"),
        ..fixture.inputs.clone()
    };

    let error = pipeline::run(&inputs, &fixture.output(), &Config::default()).unwrap_err();

    assert!(matches!(error, PipelineError::Document(_)));
    assert!(!fixture.output().exists());
}

#[test]
fn configured_font_count_bounds_indices() {
    let screens = r#"<screens><screen><text value="T1" font="3"/></screen></screens>"#;
    let font3 = concat!(
        r#"<Font Name="FONT3" TrueTypeLib="big.ttf" Size="32" Width="20" Height="28""#,
        r#" StartX="0" StartY="32"/>"#,
    );
    let attributes = ATTRIBUTES.replace("</Fonts>", &format!("{font3}</Fonts>"));
    let fixture = Fixture::new(screens, &[TRANSLATIONS], &attributes);

    assert!(fixture.run().is_err());

    let report = pipeline::run(
        &fixture.inputs,
        &fixture.output(),
        &Config::with_font_count(4),
    )
    .unwrap();
    assert_eq!(
        read_specs(&fixture.output()),
        [(
            md5_hex("65\tbig.ttf\t32\t20\t28\t0\t32\n"),
            "65\tbig.ttf\t32\t20\t28\t0\t32\n".to_owned()
        )]
    );
    assert_eq!(report.summary.written, 1);
}
