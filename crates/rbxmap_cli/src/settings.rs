use anyhow::ensure;
use rbxmap::SceneNaming;
use rbxmap_utils::{AnyResult, Otherwise};
use rbxmap_xml::PART_CLASS;
use serde::Deserialize;
use std::{fs, path::Path};

/// Optional settings file of the `import` command.
///
/// ```toml
/// part_class = "Part"
/// parent_suffix = " PARENT"
/// part_name_prefix = "Part_"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportSettings {
    /// Class of the `Item`s to import.
    pub part_class: String,
    pub parent_suffix: String,
    pub part_name_prefix: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        let naming = SceneNaming::default();
        Self {
            part_class: PART_CLASS.into(),
            parent_suffix: naming.parent_suffix,
            part_name_prefix: naming.part_prefix,
        }
    }
}

impl ImportSettings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> AnyResult<Self> {
        let text = fs::read_to_string(path)
            .otherwise(format!("couldn't read settings file {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .otherwise(format!("invalid settings file {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> AnyResult {
        ensure!(!self.part_class.is_empty(), "`part_class` can't be empty");
        ensure!(
            !self.part_name_prefix.is_empty(),
            "`part_name_prefix` can't be empty, parts would be named by bare numbers"
        );
        Ok(())
    }

    pub fn naming(&self) -> SceneNaming {
        SceneNaming {
            parent_suffix: self.parent_suffix.clone(),
            part_prefix: self.part_name_prefix.clone(),
        }
    }
}
