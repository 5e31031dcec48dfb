//! Battle engine — deterministic turn-based combat resolution.
//!
//! `resolve_battle` is a pure synchronous function: it clones both inputs,
//! alternates attacker/defender until one side reaches zero hp, and returns
//! the full round-by-round trace for the replay layer. It holds no state
//! across calls and never mutates its inputs.

use thiserror::Error;

use crate::monster::{Monster, MonsterId};

/// Hard cap on the round loop. With stat bounds of [1,200] attack/defense
/// and [1,1000] hp this only triggers in pathological matchups (two tanks
/// trading minimum damage); the result is truncated rather than failed.
pub const ROUND_CAP: u32 = 1000;

/// Precondition violations. The engine performs no other validation and
/// trusts its inputs completely.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("monster {id} cannot battle itself")]
    SameMonster { id: MonsterId },
    #[error("{name} is already defeated")]
    AlreadyDefeated { name: String },
}

/// One attacker-acts-on-defender exchange. Snapshots are taken at the
/// moment of the round: attacker pre-damage, defender post-damage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleRound {
    /// 1-based, contiguous within a battle.
    pub round_number: u32,
    pub attacker: Monster,
    pub defender: Monster,
    pub damage: u32,
    pub defender_hp_before: u32,
    pub defender_hp_after: u32,
    /// True iff this round reduced the defender to exactly zero hp.
    pub killing_blow: bool,
}

/// The complete outcome of one battle. Owned by the caller; the replay
/// layer reads it but never mutates it.
#[derive(Clone, Debug)]
pub struct BattleResult {
    /// Final snapshot, retains remaining hp.
    pub winner: Monster,
    /// Final snapshot, hp = 0 (unless the round cap truncated the battle).
    pub loser: Monster,
    pub rounds: Vec<BattleRound>,
    pub total_rounds: u32,
    /// Wall-clock compute time of the resolution call. Informational only.
    pub duration_ms: f64,
}

/// Initiative rule: strictly greater speed acts first; on a speed tie,
/// strictly greater attack; on a double tie the first argument acts first.
fn first_attacker(a: Monster, b: Monster) -> (Monster, Monster) {
    if b.speed > a.speed || (b.speed == a.speed && b.attack > a.attack) {
        (b, a)
    } else {
        (a, b)
    }
}

/// Damage formula: defense can never reduce a hit below 1 point.
fn attack_damage(attacker: &Monster, defender: &Monster) -> u32 {
    attacker.attack.saturating_sub(defender.defense).max(1)
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Resolve a full battle between two monsters.
///
/// Both monsters must be alive and distinct; violations fail fast. The
/// winner keeps its remaining hp, the loser ends at exactly 0. Should the
/// round cap ever truncate a battle, the first argument is reported as
/// winner (matching the collection-store default for unresolved fights).
pub fn resolve_battle(a: &Monster, b: &Monster) -> Result<BattleResult, BattleError> {
    if a.id == b.id {
        return Err(BattleError::SameMonster { id: a.id });
    }
    for m in [a, b] {
        if m.is_defeated() {
            return Err(BattleError::AlreadyDefeated {
                name: m.name.clone(),
            });
        }
    }

    #[cfg(target_arch = "wasm32")]
    let started = now_ms();
    #[cfg(not(target_arch = "wasm32"))]
    let started = std::time::Instant::now();

    // Snapshot isolation: all work happens on these clones.
    let (mut attacker, mut defender) = first_attacker(a.clone(), b.clone());

    let mut rounds: Vec<BattleRound> = Vec::new();
    for round_number in 1..=ROUND_CAP {
        let damage = attack_damage(&attacker, &defender);
        let defender_hp_before = defender.hp;
        defender.hp = defender.hp.saturating_sub(damage);
        let killing_blow = defender.hp == 0;

        rounds.push(BattleRound {
            round_number,
            attacker: attacker.clone(),
            defender: defender.clone(),
            damage,
            defender_hp_before,
            defender_hp_after: defender.hp,
            killing_blow,
        });

        if killing_blow {
            break;
        }
        std::mem::swap(&mut attacker, &mut defender);
    }

    if defender.hp > 0 {
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(
            &format!("battle truncated at {} rounds without a kill", ROUND_CAP).into(),
        );
    }

    let (winner, loser) = if defender.hp == 0 || attacker.id == a.id {
        (attacker, defender)
    } else {
        (defender, attacker)
    };

    #[cfg(target_arch = "wasm32")]
    let duration_ms = now_ms() - started;
    #[cfg(not(target_arch = "wasm32"))]
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

    let total_rounds = rounds.len() as u32;
    Ok(BattleResult {
        winner,
        loser,
        rounds,
        total_rounds,
        duration_ms,
    })
}
