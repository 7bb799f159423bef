//! Encounter set loader.

use std::path::Path;

use crate::adapter::{EncounterSet, to_encounter_set};
use crate::loaders::{LoadResult, read_file};
use crate::records::EncounterSetRecord;

/// Loader for encounter sets from RON files.
pub struct EncounterSetLoader;

impl EncounterSetLoader {
    /// Load and normalize an encounter set from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an EncounterSetRecord
    ///
    /// # Returns
    ///
    /// A normalized [`EncounterSet`]; individual malformed fields have
    /// already been defaulted by the adapter.
    pub fn load(path: &Path) -> LoadResult<EncounterSet> {
        let content = read_file(path)?;
        let record: EncounterSetRecord = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter set RON: {}", e))?;

        Ok(to_encounter_set(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venture_core::{EncounterCategory, StatType};

    #[test]
    fn parses_and_normalizes_a_set() {
        let source = r#"
            (
                name: Some("Emberdeep"),
                tier: Some(2),
                encounters: [
                    (
                        name: Some("Ashen Gate"),
                        category: Some("trap"),
                        primary_stat: Some("agility"),
                        difficulty: Some(55),
                    ),
                    (
                        category: Some("not-a-category"),
                    ),
                ],
            )
        "#;

        let record: EncounterSetRecord = ron::from_str(source).unwrap();
        let set = to_encounter_set(&record);

        assert_eq!(set.name, "Emberdeep");
        assert_eq!(set.tier, 2);
        assert_eq!(set.encounters.len(), 2);
        assert_eq!(set.encounters[0].category, EncounterCategory::Trap);
        assert_eq!(set.encounters[0].primary_stat, StatType::Agility);
        assert_eq!(set.encounters[1].category, EncounterCategory::Combat);
    }
}
