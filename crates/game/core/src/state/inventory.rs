//! Inventory storage.

use crate::reward::{CardDrop, EquipmentDrop, EquipmentSlot, MaterialDrop, RewardItem};
use crate::stats::StatBlock;

/// Owned items and equipped gear for one character.
///
/// At most one piece is equipped per slot; equipping returns the displaced
/// piece to the backpack.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub equipment: Vec<EquipmentDrop>,
    pub equipped: Vec<EquipmentDrop>,
    pub materials: Vec<MaterialDrop>,
    pub cards: Vec<CardDrop>,
}

impl Inventory {
    /// Insert one reward item into the matching compartment.
    ///
    /// Currency is not stored here; the gold amount is returned for the
    /// caller to credit the wallet.
    pub fn insert(&mut self, item: RewardItem) -> u32 {
        match item {
            RewardItem::Equipment(drop) => {
                self.equipment.push(drop);
                0
            }
            RewardItem::Material(drop) => {
                self.add_material(drop);
                0
            }
            RewardItem::Card(drop) => {
                self.cards.push(drop);
                0
            }
            RewardItem::Currency(amount) => amount,
        }
    }

    /// Stack materials by name and rarity.
    fn add_material(&mut self, drop: MaterialDrop) {
        if let Some(existing) = self
            .materials
            .iter_mut()
            .find(|m| m.name == drop.name && m.rarity == drop.rarity)
        {
            existing.quantity = existing.quantity.saturating_add(drop.quantity);
        } else {
            self.materials.push(drop);
        }
    }

    /// Equip a piece, displacing any current occupant of its slot.
    pub fn equip(&mut self, piece: EquipmentDrop) {
        if let Some(pos) = self.equipped.iter().position(|e| e.slot == piece.slot) {
            let displaced = self.equipped.swap_remove(pos);
            self.equipment.push(displaced);
        }
        self.equipped.push(piece);
    }

    /// Sum of stat bonuses from equipped gear.
    pub fn equipment_bonuses(&self) -> StatBlock {
        let mut bonuses = StatBlock::default();
        for piece in &self.equipped {
            bonuses.add(piece.primary_stat, piece.stat_bonus);
            if let Some(secondary) = piece.secondary_stat {
                bonuses.add(secondary, piece.stat_bonus / 2);
            }
        }
        bonuses
    }

    fn slot_of(slot: EquipmentSlot, pieces: &[EquipmentDrop]) -> Option<&EquipmentDrop> {
        pieces.iter().find(|e| e.slot == slot)
    }

    pub fn equipped_in(&self, slot: EquipmentSlot) -> Option<&EquipmentDrop> {
        Self::slot_of(slot, &self.equipped)
    }
}
