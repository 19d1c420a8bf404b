//! The rbxmap command line tool
//!
//! Imports parts out of XML place files into a plain scene description, and provides a few
//! utilities for looking into maps and the color palette.

use clap::{Parser, Subcommand};
use commands::{import::ImportCommand, inspect::InspectCommand, palette::PaletteCommand};
use rbxmap_utils::{ok, AnyResult};

pub mod commands;
pub mod settings;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Imports every part of a map into a scene file
    Import(ImportCommand),
    /// Prints statistics of a map, without building anything
    Inspect(InspectCommand),
    /// Lists the BrickColor palette, or looks up specific indices
    Palette(PaletteCommand),
}

pub trait Command {
    fn run(self) -> AnyResult;
}

/// Runs `rbxmap` as if it was ran from the command line.
pub fn run(cli: Cli) -> AnyResult {
    match cli.command {
        CliCommand::Import(c) => c.run()?,
        CliCommand::Inspect(c) => c.run()?,
        CliCommand::Palette(c) => c.run()?,
    }
    ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_arguments() {
        let cli = Cli::try_parse_from([
            "rbxmap",
            "import",
            "Crossroads.rbxlx",
            "-o",
            "crossroads.toml",
            "--quiet",
        ])
        .unwrap();

        assert!(cli.quiet);
        let CliCommand::Import(import) = cli.command else {
            panic!("expected the import command");
        };
        assert_eq!(import.map.to_str(), Some("Crossroads.rbxlx"));
        assert_eq!(import.output.as_deref().and_then(|p| p.to_str()), Some("crossroads.toml"));
        assert!(import.settings.is_none());
    }

    #[test]
    fn palette_accepts_negative_indices() {
        let cli = Cli::try_parse_from(["rbxmap", "palette", "21", "-5"]).unwrap();
        let CliCommand::Palette(palette) = cli.command else {
            panic!("expected the palette command");
        };
        assert_eq!(palette.indices, [21, -5]);
    }
}
