//! Aggregate reward bundle.

use super::items::RewardItem;
use super::result::StepResult;

/// Aggregate output of a fully or partially resolved run.
///
/// Produced by accumulating step results, owned transiently by the session
/// until claimed, then applied to persistent characters in one shot. All
/// quantities are unsigned, so reward non-negativity holds by construction.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardBundle {
    pub exp: u32,
    pub gold: u32,
    pub items: Vec<RewardItem>,
    /// Earned only on cooperative runs.
    pub bond_exp: u32,
}

impl RewardBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolved step into the running totals.
    pub fn accumulate(&mut self, step: &StepResult) {
        self.exp = self.exp.saturating_add(step.exp);
        self.gold = self.gold.saturating_add(step.gold);
        self.items.extend(step.drops.iter().cloned());
    }

    pub fn add_bond_exp(&mut self, amount: u32) {
        self.bond_exp = self.bond_exp.saturating_add(amount);
    }

    pub fn is_empty(&self) -> bool {
        self.exp == 0 && self.gold == 0 && self.items.is_empty() && self.bond_exp == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_sums_steps() {
        let mut bundle = RewardBundle::new();
        let step = StepResult {
            step_index: 0,
            success: true,
            approach: None,
            power: 50,
            difficulty: 40,
            exp: 30,
            gold: 12,
            hp_loss: 0,
            drops: vec![RewardItem::Currency(5)],
            narrative: "Success!".to_string(),
        };
        bundle.accumulate(&step);
        bundle.accumulate(&step);

        assert_eq!(bundle.exp, 60);
        assert_eq!(bundle.gold, 24);
        assert_eq!(bundle.items.len(), 2);
        assert!(!bundle.is_empty());
    }
}
