use crate::settings::ImportSettings;
use clap::Args;
use log::*;
use rbxmap::{ingest_class, BuiltScene, ImportReport, SceneDocument};
use rbxmap_utils::{ok, AnyResult, Otherwise};
use std::{fs, path::PathBuf};

#[derive(Args)]
pub struct ImportCommand {
    /// Output scene file, the scene is printed out if not specified
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Import settings file
    #[clap(long)]
    pub settings: Option<PathBuf>,
    /// Map file to import
    pub map: PathBuf,
}

impl ImportCommand {
    /// Loads and imports the map, without writing anything.
    pub fn import(&self, settings: &ImportSettings) -> AnyResult<(BuiltScene, ImportReport)> {
        info!("Reading {}...", self.map.display());
        let document = SceneDocument::open(&self.map)
            .otherwise(format!("couldn't load map {}", self.map.display()))?;

        let mut scene = BuiltScene::for_map(&self.map, &settings.naming());
        let mut last_step = 0;
        let report = ingest_class(&document, &settings.part_class)
            .with_progress(|completed, total| {
                let step = completed * 10 / total;
                if step > last_step {
                    last_step = step;
                    info!("Processed {completed} of {total} items ({}%)", step * 10);
                }
            })
            .build_into(&mut scene)?;

        Ok((scene, report))
    }
}

impl crate::Command for ImportCommand {
    fn run(self) -> AnyResult {
        let settings = match &self.settings {
            Some(path) => ImportSettings::load(path)?,
            None => ImportSettings::default(),
        };

        let (scene, report) = self.import(&settings)?;
        let text = toml::to_string_pretty(&scene)?;

        match &self.output {
            Some(path) => {
                info!("Writing {}...", path.display());
                fs::write(path, text).otherwise(format!("couldn't write {}", path.display()))?;
            }
            None => print!("{text}"),
        }

        info!(
            "Imported {} of {} items into `{}`, {} diagnostic(s)",
            report.emitted,
            report.matched,
            scene.parent,
            report.diagnostics.len()
        );
        ok()
    }
}
