//! Command line parsing and [`Action::Emit`][ae] construction.
//!
//! [ae]: crate::cli::Action::Emit

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};
use glyph_spec::Inputs;

use crate::cli::{get_paths, screens_arg, translations_arg};

/// Description of the documents to resolve and where to place the emitted records.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct EmitConfiguration {
    /// The documents to resolve.
    pub inputs: Inputs,
    /// The directory into which records are emitted.
    pub output: PathBuf,
}

/// Parses the arguments of the `emit` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "emit subcommand guarantees that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> EmitConfiguration {
    let screens = matches
        .get_one::<PathBuf>("screens")
        .cloned()
        .expect("screens is required");
    let attributes = matches
        .get_one::<PathBuf>("attributes")
        .cloned()
        .expect("attributes is required");
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .expect("output is required");

    EmitConfiguration {
        inputs: Inputs {
            screens,
            translations: get_paths(matches, "translations"),
            attributes,
        },
        output,
    }
}

/// Returns the command parser for an [`Action::Emit`][ae].
///
/// [ae]: crate::cli::Action::Emit
pub fn subcommand_parser() -> Command {
    let attributes = Arg::new("attributes")
        .long("attributes")
        .help("Physical attributes document describing each font")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true);

    let output = Arg::new("output")
        .long("output")
        .short('o')
        .help("Directory into which glyph specification records are written")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true);

    Command::new("emit")
        .about("Writes a specification record for every glyph each font must render")
        .arg(screens_arg())
        .arg(translations_arg())
        .arg(attributes)
        .arg(output)
}
