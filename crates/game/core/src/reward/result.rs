//! Step result record.

use super::items::RewardItem;

/// Outcome of one resolved step.
///
/// Records everything the presentation layer needs to replay the step and
/// everything the bundle needs to aggregate. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    pub step_index: u32,
    pub success: bool,
    /// Name of the approach used, if one was chosen.
    pub approach: Option<String>,
    /// Party power the success roll was made against (approach-multiplied).
    pub power: i32,
    pub difficulty: i32,
    pub exp: u32,
    pub gold: u32,
    /// HP lost this step (0 on success).
    pub hp_loss: u32,
    pub drops: Vec<RewardItem>,
    pub narrative: String,
}

impl StepResult {
    pub fn dropped_loot(&self) -> bool {
        !self.drops.is_empty()
    }
}
