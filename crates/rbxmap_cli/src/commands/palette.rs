use clap::Args;
use rbxmap_utils::{ok, AnyResult};
use rbxmap_xml::palette::{self, PaletteEntry, FALLBACK_COLOR};

#[derive(Args)]
pub struct PaletteCommand {
    /// Indices to look up, the whole palette is listed if none are given
    #[clap(allow_negative_numbers = true)]
    pub indices: Vec<i32>,
}

fn describe(entry: &PaletteEntry) -> String {
    let color = entry.color;
    format!(
        "{:>5}  #{:02X}{:02X}{:02X}  {}",
        entry.index, color.r, color.g, color.b, entry.name
    )
}

fn describe_unknown(index: i32) -> String {
    format!(
        "{index:>5}  unknown, falls back to ({}, {}, {})",
        FALLBACK_COLOR.r, FALLBACK_COLOR.g, FALLBACK_COLOR.b
    )
}

impl crate::Command for PaletteCommand {
    fn run(self) -> AnyResult {
        if self.indices.is_empty() {
            println!(" : {} colors", palette::palette().len());
            for entry in palette::entries() {
                println!("{}", describe(entry));
            }
            return ok();
        }

        for index in self.indices {
            match palette::entry(index) {
                Some(entry) => println!("{}", describe(entry)),
                None => println!("{}", describe_unknown(index)),
            }
        }
        ok()
    }
}
