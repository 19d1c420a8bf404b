use clap::Parser;
use log::LevelFilter;
use rbxmap_utils::{ok, AnyResult};

fn main() -> AnyResult {
    let cli = rbxmap_cli::Cli::parse_from(wild::args());

    let level = if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut logger = pretty_env_logger::formatted_builder();
    logger
        .format_indent(None)
        .format_timestamp(None)
        .filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    rbxmap_cli::run(cli)?;
    ok()
}
