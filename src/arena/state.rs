//! Arena application state — screens, replay progress, transient status.
//!
//! The battle engine's output is read-only here: the replay only moves a
//! cursor over the precomputed round sequence.

use crate::battle::BattleResult;
use crate::collection::CollectionState;
use crate::form::MonsterForm;
use crate::monster::{Monster, MonsterId};

/// Top-level tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Monsters,
    Create,
    Battle,
}

/// Sub-states of the Battle tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    /// Picking two monsters.
    Setup,
    /// Replaying the precomputed result round by round.
    Arena,
    /// Final summary.
    Result,
}

/// Ticks between revealed rounds while auto-playing (10 ticks/sec clock,
/// so 15 ticks ≈ the original's 1.5s cadence).
pub const REVEAL_INTERVAL_TICKS: u32 = 15;

/// A replay cursor over an immutable [`BattleResult`].
pub struct Replay {
    pub result: BattleResult,
    /// Snapshots of both combatants as the battle started, for display.
    pub initial: (Monster, Monster),
    /// How many rounds are revealed so far, `0..=total_rounds`.
    pub revealed: u32,
    pub playing: bool,
    /// Ticks accumulated toward the next reveal.
    pub tick_accum: u32,
    /// Whether the final snapshots were written back to the collection.
    pub applied: bool,
}

impl Replay {
    pub fn new(result: BattleResult, initial: (Monster, Monster)) -> Self {
        Self {
            result,
            initial,
            revealed: 0,
            playing: false,
            tick_accum: 0,
            applied: false,
        }
    }

    pub fn finished(&self) -> bool {
        self.revealed >= self.result.total_rounds
    }

    /// The hp of `id` as of the revealed prefix of the round trace.
    pub fn display_hp(&self, id: MonsterId) -> u32 {
        let last_hit = self.result.rounds[..self.revealed as usize]
            .iter()
            .rev()
            .find(|r| r.defender.id == id);
        match last_hit {
            Some(round) => round.defender_hp_after,
            None if self.initial.0.id == id => self.initial.0.hp,
            None => self.initial.1.hp,
        }
    }
}

pub struct ArenaState {
    pub screen: Screen,
    pub battle_phase: BattlePhase,
    pub collection: CollectionState,
    pub form: MonsterForm,
    pub replay: Option<Replay>,
    /// Row focused on the Monsters screen (index into the sorted view).
    pub focused: Option<MonsterId>,
    /// One-line transient message shown in the help bar.
    pub status: Option<String>,
}

impl ArenaState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Monsters,
            battle_phase: BattlePhase::Setup,
            collection: CollectionState::new(),
            form: MonsterForm::new(),
            replay: None,
            focused: None,
            status: None,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }
}
