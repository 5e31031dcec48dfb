//! Monster model — identity, stats, and the derived power score.
//!
//! Stats are fixed at creation; only `hp` ever changes, and only through
//! battle damage or an explicit heal-to-full in the collection store.

use serde::{Deserialize, Serialize};

/// Inclusive bounds for attack / defense / speed.
pub const STAT_MIN: u32 = 1;
pub const STAT_MAX: u32 = 200;

/// Inclusive bounds for max hp.
pub const HP_MIN: u32 = 1;
pub const HP_MAX: u32 = 1000;

/// Opaque unique monster identity. Assigned once by the collection store
/// from a persisted counter; never reused, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u64);

impl std::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Validated stat block without identity. Produced by form validation or
/// the sample set; turned into a [`Monster`] when the store assigns an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterDraft {
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_hp: u32,
}

/// A monster in the collection. Entity identity is `id` alone — two
/// monsters with identical stats but different ids are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Current hit points, always in `0..=max_hp`.
    pub hp: u32,
    pub max_hp: u32,
}

impl Monster {
    /// Create a monster at full health from a validated draft.
    pub fn from_draft(id: MonsterId, draft: MonsterDraft) -> Self {
        Self {
            id,
            name: draft.name,
            attack: draft.attack,
            defense: draft.defense,
            speed: draft.speed,
            hp: draft.max_hp,
            max_hp: draft.max_hp,
        }
    }

    /// Display-only additive score over the four stats, using *current* hp
    /// so a damaged monster ranks lower. Never used by battle resolution.
    pub fn power(&self) -> u32 {
        self.attack + self.defense + self.speed + self.hp
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

/// Sort a slice of monsters by power, highest first. Display ordering only.
pub fn sort_by_power(monsters: &mut [Monster]) {
    monsters.sort_by(|a, b| b.power().cmp(&a.power()));
}

/// The fixed sample set used to seed an empty collection on first run.
pub fn sample_drafts() -> Vec<MonsterDraft> {
    let stats = [
        ("Dragão de Fogo", 85, 60, 70, 120),
        ("Lobo Sombrio", 75, 45, 95, 80),
        ("Golem de Pedra", 60, 90, 30, 150),
        ("Fênix Dourada", 90, 55, 85, 100),
    ];
    stats
        .into_iter()
        .map(|(name, attack, defense, speed, max_hp)| MonsterDraft {
            name: name.to_string(),
            attack,
            defense,
            speed,
            max_hp,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster(id: u64, attack: u32, defense: u32, speed: u32, hp: u32) -> Monster {
        Monster {
            id: MonsterId(id),
            name: format!("m{}", id),
            attack,
            defense,
            speed,
            hp,
            max_hp: hp,
        }
    }

    #[test]
    fn from_draft_starts_at_full_health() {
        let m = Monster::from_draft(
            MonsterId(1),
            MonsterDraft {
                name: "Test".into(),
                attack: 10,
                defense: 20,
                speed: 30,
                max_hp: 40,
            },
        );
        assert_eq!(m.hp, 40);
        assert_eq!(m.max_hp, 40);
    }

    #[test]
    fn power_uses_current_hp() {
        let mut m = monster(1, 85, 60, 70, 120);
        assert_eq!(m.power(), 335);
        m.hp = 50;
        assert_eq!(m.power(), 265);
    }

    #[test]
    fn sort_by_power_descending() {
        let mut list = vec![
            monster(1, 10, 10, 10, 10), // power 40
            monster(2, 50, 50, 50, 50), // power 200
            monster(3, 20, 20, 20, 20), // power 80
        ];
        sort_by_power(&mut list);
        let ids: Vec<u64> = list.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn sample_set_has_four_fixed_monsters() {
        let samples = sample_drafts();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].name, "Dragão de Fogo");
        assert_eq!(samples[0].attack, 85);
        assert_eq!(samples[1].speed, 95);
        assert_eq!(samples[2].max_hp, 150);
        assert_eq!(samples[3].attack, 90);
    }

    #[test]
    fn identity_is_by_id_only() {
        let a = monster(1, 10, 10, 10, 10);
        let b = monster(2, 10, 10, 10, 10);
        assert_ne!(a.id, b.id);
    }
}
