//! Command line parsing and [`Action::Characters`][ac] construction.
//!
//! [ac]: crate::cli::Action::Characters

use std::path::PathBuf;

use clap::{ArgMatches, Command};

use crate::cli::{get_paths, screens_arg, translations_arg};

/// Description of the documents whose required code points should be printed.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CharactersConfiguration {
    /// The screen document to resolve.
    pub screens: PathBuf,
    /// The translation documents to resolve.
    pub translations: Vec<PathBuf>,
}

/// Parses the arguments of the `characters` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "characters subcommand guarantees that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> CharactersConfiguration {
    let screens = matches
        .get_one::<PathBuf>("screens")
        .cloned()
        .expect("screens is required");

    CharactersConfiguration {
        screens,
        translations: get_paths(matches, "translations"),
    }
}

/// Returns the command parser for an [`Action::Characters`][ac].
///
/// [ac]: crate::cli::Action::Characters
pub fn subcommand_parser() -> Command {
    Command::new("characters")
        .about("Prints the code points each font must render without writing any records")
        .arg(screens_arg())
        .arg(translations_arg())
}
