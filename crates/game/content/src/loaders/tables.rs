//! Balance tables loader.

use std::path::Path;

use venture_core::BalanceTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load balance tables from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BalanceTables> {
        let content = read_file(path)?;
        let tables: BalanceTables = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance tables TOML: {}", e))?;

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_tables() {
        let source = r#"
            [chance]
            center = 0.5
            band = 20
            floor = 0.05
            ceiling = 0.95

            [damage]
            minimum = 5
            maximum = 25
            difficulty_divisor = 4
            deficit_divisor = 2

            [reward]
            base_exp = 25
            exp_step_scale = 10
            base_gold = 12
            gold_step_scale = 5
            boss_multiplier = 2
            risky_threshold = 1.1
            equipment_drop_chance = 0.12
            material_drop_chance = 0.3
            card_drop_chance = 0.06
            bond_exp_per_step = 5

            [level]
            base_threshold = 80
            per_level = 10
        "#;

        let tables: BalanceTables = toml::from_str(source).unwrap();
        assert_eq!(tables.chance.band, 20);
        assert_eq!(tables.reward.base_exp, 25);
        assert_eq!(tables.level.exp_to_next(40), 480);
    }
}
