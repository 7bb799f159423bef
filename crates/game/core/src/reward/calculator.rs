//! Step reward calculation.

use crate::encounter::{Approach, EncounterDefinition};
use crate::env::{Env, RngOracle, TablesOracle, compute_seed};
use crate::resolve::failure_damage;

use super::loot::{roll_card, roll_equipment, roll_material};
use super::narrative::narrative_line;
use super::result::StepResult;

/// Seed context channels used per step.
///
/// Loot parameter draws continue from channel 5 (see [`super::loot`]).
pub const CTX_SUCCESS: u32 = 0;
const CTX_EQUIPMENT_GATE: u32 = 1;
const CTX_MATERIAL_GATE: u32 = 2;
const CTX_CARD_GATE: u32 = 3;
const CTX_NARRATIVE: u32 = 4;

/// Inputs for computing one step's reward.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub step_index: u32,
    /// Dungeon tier / arena bracket / expedition depth; scales payouts.
    pub tier: u32,
    pub encounter: &'a EncounterDefinition,
    pub approach: Option<&'a Approach>,
    /// Seed fixed when the run was committed.
    pub session_seed: u64,
    /// Sum of the party's luck stat; nudges drop gates.
    pub party_luck: i32,
}

/// Compute the full [`StepResult`] for a resolved step.
///
/// # Arguments
///
/// * `ctx` - Step inputs (index, tier, encounter, approach, seed)
/// * `success` - Outcome of the success roll
/// * `power` - Approach-multiplied power the roll was made against
/// * `raw_power` - Un-multiplied power, used for the failure penalty
/// * `env` - RNG and balance oracles
///
/// On success: experience and gold scale with step index and tier, boss
/// steps pay a multiple, and risky approaches (multiplier above the
/// threshold) earn a proportional bonus. Each drop kind rolls its own
/// independent gate. On failure: zero experience and gold, no loot rolls,
/// and an HP loss computed from un-multiplied power times the approach's
/// risk modifier.
pub fn compute_step_reward<R, T>(
    ctx: StepContext<'_>,
    success: bool,
    power: i32,
    raw_power: i32,
    env: Env<'_, R, T>,
) -> StepResult
where
    R: RngOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    let params = env.balance().reward;
    let approach_name = ctx.approach.map(|a| a.name.clone());

    let narrative = narrative_line(
        ctx.encounter.category,
        success,
        compute_seed(ctx.session_seed, ctx.step_index, CTX_NARRATIVE),
        env.rng,
    )
    .to_string();

    if !success {
        let risk = ctx.approach.map_or(1.0, |a| a.risk_modifier);
        let hp_loss = failure_damage(raw_power, ctx.encounter.difficulty, risk, env.tables);

        return StepResult {
            step_index: ctx.step_index,
            success: false,
            approach: approach_name,
            power,
            difficulty: ctx.encounter.difficulty,
            exp: 0,
            gold: 0,
            hp_loss,
            drops: Vec::new(),
            narrative,
        };
    }

    let tier = ctx.tier.max(1);
    let mut exp = (params.base_exp + params.exp_step_scale * ctx.step_index) * tier;
    let mut gold = (params.base_gold + params.gold_step_scale * ctx.step_index) * tier;

    if ctx.encounter.is_boss {
        exp *= params.boss_multiplier;
        gold *= params.boss_multiplier;
    }

    // Risky approaches buy extra payout with the same coin they buy danger.
    if let Some(approach) = ctx.approach {
        if approach.power_multiplier > params.risky_threshold {
            let bonus = (approach.power_multiplier - 1.0) * 0.5 + 1.0;
            exp = (f64::from(exp) * bonus) as u32;
            gold = (f64::from(gold) * bonus) as u32;
        }
    }

    let mut drops = Vec::new();
    let gate_bonus =
        ctx.encounter.bonus_loot_chance + (f64::from(ctx.party_luck) * 0.001).min(0.10);

    let equipment_gate = compute_seed(ctx.session_seed, ctx.step_index, CTX_EQUIPMENT_GATE);
    if env.rng.roll_unit(equipment_gate) < params.equipment_drop_chance + gate_bonus {
        drops.push(super::items::RewardItem::Equipment(roll_equipment(
            ctx.encounter,
            tier,
            ctx.session_seed,
            ctx.step_index,
            env.rng,
        )));
    }

    let material_gate = compute_seed(ctx.session_seed, ctx.step_index, CTX_MATERIAL_GATE);
    if env.rng.roll_unit(material_gate) < params.material_drop_chance + gate_bonus {
        drops.push(super::items::RewardItem::Material(roll_material(
            tier,
            ctx.session_seed,
            ctx.step_index,
            env.rng,
        )));
    }

    let card_gate = compute_seed(ctx.session_seed, ctx.step_index, CTX_CARD_GATE);
    if env.rng.roll_unit(card_gate) < params.card_drop_chance + gate_bonus {
        drops.push(super::items::RewardItem::Card(roll_card(
            tier,
            ctx.session_seed,
            ctx.step_index,
            env.rng,
        )));
    }

    StepResult {
        step_index: ctx.step_index,
        success: true,
        approach: approach_name,
        power,
        difficulty: ctx.encounter.difficulty,
        exp,
        gold,
        hp_loss: 0,
        drops,
        narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BalanceTables, PcgRng};
    use crate::stats::StatType;

    fn env<'a>(tables: &'a BalanceTables, rng: &'a PcgRng) -> Env<'a, PcgRng, BalanceTables> {
        Env::new(rng, tables)
    }

    fn ctx<'a>(encounter: &'a EncounterDefinition, approach: Option<&'a Approach>) -> StepContext<'a> {
        StepContext {
            step_index: 2,
            tier: 1,
            encounter,
            approach,
            session_seed: 77,
            party_luck: 0,
        }
    }

    #[test]
    fn success_pays_scaled_exp_and_gold() {
        let tables = BalanceTables::default();
        let rng = PcgRng;
        let enc = EncounterDefinition::new("Cellar", StatType::Strength, 40);

        let result = compute_step_reward(ctx(&enc, None), true, 50, 50, env(&tables, &rng));

        // base_exp 20 + 8 × 2 = 36; base_gold 10 + 4 × 2 = 18
        assert_eq!(result.exp, 36);
        assert_eq!(result.gold, 18);
        assert_eq!(result.hp_loss, 0);
    }

    #[test]
    fn boss_steps_pay_double() {
        let tables = BalanceTables::default();
        let rng = PcgRng;
        let plain = EncounterDefinition::new("Hall", StatType::Strength, 40);
        let boss = EncounterDefinition::new("Throne", StatType::Strength, 40).with_boss(true);

        let base = compute_step_reward(ctx(&plain, None), true, 50, 50, env(&tables, &rng));
        let paid = compute_step_reward(ctx(&boss, None), true, 50, 50, env(&tables, &rng));

        assert_eq!(paid.exp, base.exp * 2);
        assert_eq!(paid.gold, base.gold * 2);
    }

    #[test]
    fn risky_approach_earns_bonus() {
        let tables = BalanceTables::default();
        let rng = PcgRng;
        let enc = EncounterDefinition::new("Hall", StatType::Strength, 40);
        let safe = Approach::new("Steady", 1.0, 1.0);
        let risky = Approach::new("Reckless", 1.3, 1.5);

        let base = compute_step_reward(ctx(&enc, Some(&safe)), true, 50, 50, env(&tables, &rng));
        let bonus = compute_step_reward(ctx(&enc, Some(&risky)), true, 65, 50, env(&tables, &rng));

        // (1.3 - 1.0) × 0.5 + 1.0 = 1.15
        assert_eq!(bonus.exp, (f64::from(base.exp) * 1.15) as u32);
        assert!(bonus.gold >= base.gold);
    }

    #[test]
    fn failure_pays_nothing_and_rolls_no_loot() {
        let tables = BalanceTables::default();
        let rng = PcgRng;
        let enc = EncounterDefinition::new("Pit", StatType::Agility, 80);

        let result = compute_step_reward(ctx(&enc, None), false, 60, 60, env(&tables, &rng));

        assert_eq!(result.exp, 0);
        assert_eq!(result.gold, 0);
        assert!(result.drops.is_empty());
        assert!(result.hp_loss >= tables.damage.minimum);
        assert!(!result.narrative.is_empty());
    }

    #[test]
    fn failure_damage_uses_unmultiplied_power() {
        // Power 60 vs difficulty 80 with a 1.3× approach: the roll sees 78,
        // the penalty sees 60 scaled by the risk modifier.
        let tables = BalanceTables::default();
        let rng = PcgRng;
        let enc = EncounterDefinition::new("Pit", StatType::Agility, 80);
        let reckless = Approach::new("Reckless", 1.3, 1.5);

        let result =
            compute_step_reward(ctx(&enc, Some(&reckless)), false, 78, 60, env(&tables, &rng));

        let expected = failure_damage(60, 80, 1.5, &tables);
        assert_eq!(result.hp_loss, expected);
        assert_eq!(result.power, 78);
    }

    #[test]
    fn results_are_deterministic_for_a_seed() {
        let tables = BalanceTables::default();
        let rng = PcgRng;
        let enc =
            EncounterDefinition::new("Vault", StatType::Luck, 30).with_bonus_loot_chance(0.5);

        let a = compute_step_reward(ctx(&enc, None), true, 90, 90, env(&tables, &rng));
        let b = compute_step_reward(ctx(&enc, None), true, 90, 90, env(&tables, &rng));
        assert_eq!(a, b);
    }
}
