//! Chore catalog loading from `config/chores.toml`.
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bevy::{
    log::{info, warn},
    prelude::*,
};
use serde::Deserialize;

const CHORES_CONFIG_PATH: &str = "config/chores.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ChoresConfig {
    pub chores: Vec<ChoreConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoreConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub item_key: String,
    pub item_position: [f32; 2],
    pub target: [f32; 2],
    #[serde(default)]
    pub reveal_key: Option<String>,
    #[serde(default)]
    pub reveal_position: Option<[f32; 2]>,
}

/// Static description of a chore, used to seed the registry and the house layout.
#[derive(Debug, Clone)]
pub struct ChoreDefinition {
    pub name: String,
    pub description: String,
    pub item_key: String,
    pub item_position: Vec2,
    pub target: Vec2,
    pub reveal: Option<RevealItem>,
}

/// Item that only becomes visible once its chore is complete.
#[derive(Debug, Clone)]
pub struct RevealItem {
    pub key: String,
    pub position: Vec2,
}

#[derive(Resource, Debug, Clone)]
pub struct ChoreCatalog {
    chores: Vec<ChoreDefinition>,
}

impl ChoreCatalog {
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CHORES_CONFIG_PATH) {
            Ok(catalog) => {
                info!(
                    target: "tasks",
                    "Loaded {} chores from {}",
                    catalog.len(),
                    CHORES_CONFIG_PATH
                );
                catalog
            }
            Err(err) => {
                warn!(
                    "Failed to load {} ({}). Falling back to built-in chores.",
                    CHORES_CONFIG_PATH, err
                );
                Self::builtin()
            }
        }
    }

    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data =
            fs::read_to_string(&path).map_err(|err| format!("unable to read file: {err}"))?;
        let config: ChoresConfig =
            toml::from_str(&data).map_err(|err| format!("invalid chores config: {err}"))?;
        Self::from_config(config)
    }

    pub fn from_config(config: ChoresConfig) -> Result<Self, String> {
        if config.chores.is_empty() {
            return Err("chores config must define at least one chore".to_string());
        }

        let mut seen_keys = HashSet::new();
        let mut chores = Vec::with_capacity(config.chores.len());

        for chore in config.chores {
            let name = chore.name.trim();
            if name.is_empty() {
                return Err("chore name cannot be empty".to_string());
            }

            let item_key = chore.item_key.trim();
            if item_key.is_empty() {
                return Err(format!("chore '{}' must name an item_key", name));
            }
            if !seen_keys.insert(item_key.to_string()) {
                return Err(format!("item_key '{}' is used by more than one chore", item_key));
            }

            let item_position = Vec2::from_array(chore.item_position);
            let reveal = chore
                .reveal_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
                .map(|key| RevealItem {
                    key,
                    position: chore
                        .reveal_position
                        .map(Vec2::from_array)
                        .unwrap_or(item_position),
                });

            chores.push(ChoreDefinition {
                name: name.to_string(),
                description: chore.description.trim().to_string(),
                item_key: item_key.to_string(),
                item_position,
                target: Vec2::from_array(chore.target),
                reveal,
            });
        }

        // Revealed items share the interactable namespace with chore items.
        let mut seen_reveals = HashSet::new();
        for reveal in chores.iter().filter_map(|chore| chore.reveal.as_ref()) {
            if seen_keys.contains(&reveal.key) {
                return Err(format!(
                    "reveal_key '{}' collides with a chore item_key",
                    reveal.key
                ));
            }
            if !seen_reveals.insert(reveal.key.as_str()) {
                return Err(format!(
                    "reveal_key '{}' is used by more than one chore",
                    reveal.key
                ));
            }
        }

        Ok(Self { chores })
    }

    /// The house as the owner left it.
    pub fn builtin() -> Self {
        let chore = |name: &str, description: &str, key: &str, item: [f32; 2], target: [f32; 2]| {
            ChoreConfig {
                name: name.to_string(),
                description: description.to_string(),
                item_key: key.to_string(),
                item_position: item,
                target,
                reveal_key: None,
                reveal_position: None,
            }
        };

        let mut make_bed = chore(
            "Make the bed",
            "The sheets have not been touched in weeks.",
            "bedMessy",
            [-450.0, 305.0],
            [-450.0, 265.0],
        );
        make_bed.reveal_key = Some("bedNeat".to_string());

        let config = ChoresConfig {
            chores: vec![
                chore(
                    "Throw out the chip bags",
                    "Empty snack bags are scattered by the sofa.",
                    "chips",
                    [100.0, 175.0],
                    [70.0, 175.0],
                ),
                chore(
                    "Put the clothes away",
                    "A pile of laundry covers the bedroom floor.",
                    "clothes",
                    [-340.0, 245.0],
                    [-340.0, 215.0],
                ),
                chore(
                    "Unpack the boxes",
                    "Moving boxes that were never opened.",
                    "boxes",
                    [360.0, 255.0],
                    [330.0, 255.0],
                ),
                chore(
                    "Wash the dishes",
                    "Plates are stacked high in the sink.",
                    "plates",
                    [0.0, -25.0],
                    [0.0, -55.0],
                ),
                chore(
                    "Sweep the floor",
                    "The broom is leaning where it was dropped.",
                    "broom",
                    [450.0, 45.0],
                    [420.0, 45.0],
                ),
                make_bed,
                chore(
                    "Scrub the bathroom",
                    "Something splashed across the tiles.",
                    "dirtSplashes",
                    [-380.0, -195.0],
                    [-350.0, -195.0],
                ),
                chore(
                    "Wipe the table",
                    "Sticky rings and crumbs on the coffee table.",
                    "dirtyTableSplotches",
                    [70.0, 105.0],
                    [70.0, 135.0],
                ),
            ],
        };

        Self::from_config(config).unwrap_or(Self { chores: Vec::new() })
    }

    pub fn chores(&self) -> &[ChoreDefinition] {
        &self.chores
    }

    pub fn len(&self) -> usize {
        self.chores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chore(name: &str, key: &str) -> ChoreConfig {
        ChoreConfig {
            name: name.to_string(),
            description: String::new(),
            item_key: key.to_string(),
            item_position: [1.0, 2.0],
            target: [3.0, 4.0],
            reveal_key: None,
            reveal_position: None,
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = ChoreCatalog::builtin();
        assert_eq!(catalog.len(), 8);

        let bed = catalog
            .chores()
            .iter()
            .find(|chore| chore.item_key == "bedMessy")
            .expect("bed chore should exist");
        let reveal = bed.reveal.as_ref().expect("bed reveals the neat variant");
        assert_eq!(reveal.key, "bedNeat");
        assert_eq!(reveal.position, bed.item_position);
    }

    #[test]
    fn rejects_duplicate_item_keys() {
        let config = ChoresConfig {
            chores: vec![chore("One", "chips"), chore("Two", " chips ")],
        };
        let err = ChoreCatalog::from_config(config).unwrap_err();
        assert!(err.contains("chips"));
    }

    #[test]
    fn rejects_empty_catalog_and_blank_keys() {
        assert!(ChoreCatalog::from_config(ChoresConfig { chores: Vec::new() }).is_err());
        assert!(ChoreCatalog::from_config(ChoresConfig {
            chores: vec![chore("Blank", "   ")],
        })
        .is_err());
    }

    #[test]
    fn parses_toml_document() {
        let raw = r#"
            [[chores]]
            name = "Make the bed"
            item_key = "bedMessy"
            item_position = [0.0, 10.0]
            target = [0.0, -20.0]
            reveal_key = "bedNeat"
            reveal_position = [5.0, 10.0]
        "#;
        let config: ChoresConfig = toml::from_str(raw).expect("config should parse");
        let catalog = ChoreCatalog::from_config(config).expect("config should validate");

        let bed = &catalog.chores()[0];
        assert_eq!(bed.target, Vec2::new(0.0, -20.0));
        assert_eq!(bed.reveal.as_ref().map(|r| r.position), Some(Vec2::new(5.0, 10.0)));
        assert!(bed.description.is_empty());
    }

    #[test]
    fn rejects_reveal_keys_that_shadow_other_items() {
        let mut bed = chore("Make the bed", "bedMessy");
        bed.reveal_key = Some("chips".to_string());
        let config = ChoresConfig {
            chores: vec![bed, chore("Throw out the chips", "chips")],
        };
        let err = ChoreCatalog::from_config(config).unwrap_err();
        assert!(err.contains("reveal_key 'chips'"));

        let mut first = chore("One", "a");
        first.reveal_key = Some("neat".to_string());
        let mut second = chore("Two", "b");
        second.reveal_key = Some(" neat ".to_string());
        let config = ChoresConfig {
            chores: vec![first, second],
        };
        assert!(ChoreCatalog::from_config(config).is_err());
    }
}
