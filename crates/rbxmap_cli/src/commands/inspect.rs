use clap::Args;
use rbxmap::{ingest_class, SceneDocument};
use rbxmap_utils::{ok, AnyResult, Otherwise};
use rbxmap_xml::{PropertyBlock, PART_CLASS};
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectCommand {
    /// Class of the items to count
    #[clap(long, default_value = PART_CLASS)]
    pub class: String,
    /// Map file to inspect
    pub map: PathBuf,
}

/// Counts gathered by [`InspectCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapStatistics {
    pub matched: usize,
    pub missing_properties: usize,
    pub importable: usize,
    pub diagnostics: Vec<String>,
}

impl MapStatistics {
    pub fn collect(document: &SceneDocument, class: &str) -> Self {
        let missing_properties = document
            .items_of_class(class)
            .into_iter()
            .filter(|item| PropertyBlock::of_item(item).is_none())
            .count();

        let mut ingestion = ingest_class(document, class);
        let importable = ingestion.by_ref().count();
        let report = ingestion.into_report();

        Self {
            matched: report.matched,
            missing_properties,
            importable,
            diagnostics: report.diagnostics.iter().map(ToString::to_string).collect(),
        }
    }
}

impl crate::Command for InspectCommand {
    fn run(self) -> AnyResult {
        let document = SceneDocument::open(&self.map)
            .otherwise(format!("couldn't load map {}", self.map.display()))?;
        let stats = MapStatistics::collect(&document, &self.class);

        println!(" : {}", self.map.display());
        println!("  - `{}` items:        {}", self.class, stats.matched);
        println!("  - without properties: {}", stats.missing_properties);
        println!("  - importable:         {}", stats.importable);
        println!("  - diagnostics:        {}", stats.diagnostics.len());
        for diagnostic in &stats.diagnostics {
            println!("    - {diagnostic}");
        }

        ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics() {
        let document = SceneDocument::parse(
            r#"<roblox>
                <Item class="Part"><Properties/></Item>
                <Item class="Part"/>
                <Item class="Part"><Properties>
                    <CoordinateFrame name="CFrame"><X>1</X></CoordinateFrame>
                </Properties></Item>
                <Item class="Model"/>
            </roblox>"#,
        )
        .unwrap();

        let stats = MapStatistics::collect(&document, PART_CLASS);
        assert_eq!(stats.matched, 3);
        assert_eq!(stats.missing_properties, 1);
        assert_eq!(stats.importable, 1);
        assert_eq!(stats.diagnostics.len(), 1);
        assert!(stats.diagnostics[0].starts_with("part #3"));
    }

    #[test]
    fn statistics_of_other_classes() {
        let document = SceneDocument::parse(r#"<roblox><Item class="Part"/></roblox>"#).unwrap();
        let stats = MapStatistics::collect(&document, "Seat");
        assert_eq!(stats.matched, 0);
        assert_eq!(stats.diagnostics, ["no parts found in the document"]);
    }
}
