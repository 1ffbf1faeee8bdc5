//! Command line parsing and [`Action::Usages`][au] construction.
//!
//! [au]: crate::cli::Action::Usages

use std::path::PathBuf;

use clap::{ArgMatches, Command};

use crate::cli::screens_arg;

/// Description of the screen document whose font usage should be printed.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct UsagesConfiguration {
    /// The screen document to resolve.
    pub screens: PathBuf,
}

/// Parses the arguments of the `usages` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "usages subcommand guarantees that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> UsagesConfiguration {
    let screens = matches
        .get_one::<PathBuf>("screens")
        .cloned()
        .expect("screens is required");

    UsagesConfiguration { screens }
}

/// Returns the command parser for an [`Action::Usages`][au].
///
/// [au]: crate::cli::Action::Usages
pub fn subcommand_parser() -> Command {
    Command::new("usages")
        .about("Prints the fonts that render each text identifier")
        .arg(screens_arg())
}
