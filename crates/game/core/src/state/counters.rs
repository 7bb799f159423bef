//! Attempt gating counters.
//!
//! Daily and weekly caps are preconditions checked before a run session is
//! created; they live on the character, not on the session. The core never
//! reads a clock — callers convert wall time into day numbers (days since
//! the Unix epoch, in the player's zone) and ISO week ids before calling in.

/// Per-character attempt bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttemptCounters {
    /// Day number of the last free arena entry.
    pub arena_entry_day: Option<i64>,
    /// Raid attacks spent on `raid_attack_day`.
    pub raid_attacks_used: u32,
    /// Day number the raid attack counter applies to.
    pub raid_attack_day: Option<i64>,
    /// Keys in hand; one is consumed per expedition launch.
    pub expedition_keys: u32,
    /// Consecutive days with at least one completed run.
    pub streak: u32,
    /// Day number of the last completed run (drives the streak).
    pub last_completion_day: Option<i64>,
}

impl AttemptCounters {
    /// One free arena attempt per day.
    pub fn arena_available(&self, today: i64) -> bool {
        self.arena_entry_day != Some(today)
    }

    pub fn note_arena_entry(&mut self, today: i64) {
        self.arena_entry_day = Some(today);
    }

    /// Raid attacks remaining today against a daily cap.
    pub fn raid_attacks_remaining(&self, today: i64, daily_cap: u32) -> u32 {
        if self.raid_attack_day == Some(today) {
            daily_cap.saturating_sub(self.raid_attacks_used)
        } else {
            daily_cap
        }
    }

    pub fn note_raid_attack(&mut self, today: i64) {
        if self.raid_attack_day == Some(today) {
            self.raid_attacks_used += 1;
        } else {
            self.raid_attack_day = Some(today);
            self.raid_attacks_used = 1;
        }
    }

    /// Consume one expedition key; false if none are left.
    pub fn consume_expedition_key(&mut self) -> bool {
        if self.expedition_keys == 0 {
            return false;
        }
        self.expedition_keys -= 1;
        true
    }

    /// Record a completed run, extending or resetting the streak.
    pub fn note_completion(&mut self, today: i64) {
        self.streak = match self.last_completion_day {
            Some(day) if day == today => self.streak,
            Some(day) if day == today - 1 => self.streak + 1,
            _ => 1,
        };
        self.last_completion_day = Some(today);
    }
}
