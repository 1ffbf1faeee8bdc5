//! Tool for determining the glyphs each bitmap font must render and emitting a specification
//! record for every one of them.

use anyhow::Result;
use cli::Action;

pub mod action;
pub mod cli;

fn main() -> Result<()> {
    let invocation = cli::get_invocation();

    env_logger::Builder::new()
        .filter_level(invocation.log_level)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    match invocation.action {
        Action::Emit(config) => action::emit::emit(&invocation.config, config)?,
        Action::Usages(config) => action::usages::usages(&invocation.config, config)?,
        Action::Characters(config) => action::characters::characters(&invocation.config, config)?,
    }

    Ok(())
}
