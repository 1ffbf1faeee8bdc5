//! Command line parsing and [`Action`] construction.

pub mod characters;
pub mod emit;
pub mod usages;

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use glyph_spec::Config;
use log::LevelFilter;

pub use characters::CharactersConfiguration;
pub use emit::EmitConfiguration;
pub use usages::UsagesConfiguration;

/// Everything requested by the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// The limits applied while resolving and emitting.
    pub config: Config,
    /// The most verbose log messages that should be shown.
    pub log_level: LevelFilter,
    /// The [`Action`] to carry out.
    pub action: Action,
}

/// Parses `spec-glyphs`'s arguments to construct an [`Invocation`].
#[expect(
    clippy::missing_panics_doc,
    reason = "arguments with default values are always present"
)]
pub fn get_invocation() -> Invocation {
    let matches = command_parser().get_matches();

    let config = parse_config(&matches);
    let log_level = log_level(&matches);

    let (subcommand_name, subcommand_matches) =
        matches.subcommand().expect("subcommand is required");
    let action = match subcommand_name {
        "emit" => Action::Emit(emit::parse_arguments(subcommand_matches)),
        "usages" => Action::Usages(usages::parse_arguments(subcommand_matches)),
        "characters" => Action::Characters(characters::parse_arguments(subcommand_matches)),
        _ => unreachable!("unexpected subcommand: {subcommand_name:?}"),
    };

    Invocation {
        config,
        log_level,
        action,
    }
}

/// Parses the limits applied while resolving and emitting.
fn parse_config(matches: &ArgMatches) -> Config {
    let font_count = matches
        .get_one::<u16>("font-count")
        .copied()
        .map(usize::from)
        .expect("font-count has a default value");
    let max_path_len = matches
        .get_one::<usize>("max-path-length")
        .copied()
        .expect("max-path-length has a default value");
    let max_record_len = matches
        .get_one::<usize>("max-record-length")
        .copied()
        .expect("max-record-length has a default value");

    Config {
        font_count,
        max_path_len,
        max_record_len,
    }
}

/// Returns the [`LevelFilter`] selected by the `verbose` and `quiet` flags.
fn log_level(matches: &ArgMatches) -> LevelFilter {
    if matches.get_flag("quiet") {
        return LevelFilter::Error;
    }

    match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Returns the command parser for all [`Action`]s.
fn command_parser() -> Command {
    let font_count = Arg::new("font-count")
        .long("font-count")
        .help("Number of bitmap fonts, valid font indices are 0 up to this value")
        .value_parser(clap::value_parser!(u16).range(1..))
        .default_value("3")
        .global(true);

    let max_path_length = Arg::new("max-path-length")
        .long("max-path-length")
        .help("Longest typeface path, in bytes, a font may declare")
        .value_parser(clap::value_parser!(usize))
        .default_value("255")
        .global(true);

    let max_record_length = Arg::new("max-record-length")
        .long("max-record-length")
        .help("Longest glyph specification record, in bytes, that may be emitted")
        .value_parser(clap::value_parser!(usize))
        .default_value("512")
        .global(true);

    let verbose = Arg::new("verbose")
        .long("verbose")
        .short('v')
        .help("Show more log messages, repeat for more detail")
        .action(ArgAction::Count)
        .global(true);

    let quiet = Arg::new("quiet")
        .long("quiet")
        .short('q')
        .help("Only show errors")
        .action(ArgAction::SetTrue)
        .conflicts_with("verbose")
        .global(true);

    Command::new("spec-glyphs")
        .about("Determines the glyphs each bitmap font must render")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(font_count)
        .arg(max_path_length)
        .arg(max_record_length)
        .arg(verbose)
        .arg(quiet)
        .subcommand(emit::subcommand_parser())
        .subcommand(usages::subcommand_parser())
        .subcommand(characters::subcommand_parser())
}

/// Returns the `--screens` argument shared by every subcommand.
fn screens_arg() -> Arg {
    Arg::new("screens")
        .long("screens")
        .help("Screen document describing which fonts render each text identifier")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true)
}

/// Returns the `--translations` argument shared by the subcommands that resolve code points.
fn translations_arg() -> Arg {
    Arg::new("translations")
        .long("translations")
        .help("Translation document providing the text of each text identifier, may be repeated")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Append)
        .required(true)
}

/// Returns the values of a required argument that accepts multiple paths.
fn get_paths(matches: &ArgMatches, name: &str) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>(name)
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}

/// The action to carry out.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    /// Resolve every required glyph and emit its specification record.
    Emit(EmitConfiguration),
    /// Print which fonts render each text identifier.
    Usages(UsagesConfiguration),
    /// Print the code points each font requires.
    Characters(CharactersConfiguration),
}
