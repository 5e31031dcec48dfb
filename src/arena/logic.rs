//! Arena logic — screen transitions, battle kickoff, replay advancement.
//!
//! The replay is a cooperative consumer of the engine's output: it reveals
//! rounds at its own cadence and never touches the `BattleResult` itself.
//! Collection writes go through `CollectionCommand`; every mutation that
//! changes the monster list is followed by a persistence save.

use crate::battle::resolve_battle;
use crate::collection::CollectionCommand;
use crate::monster::{sort_by_power, Monster, MonsterId};

use super::save;
use super::state::{ArenaState, BattlePhase, Replay, Screen, REVEAL_INTERVAL_TICKS};

/// Apply a collection command and persist if the list changed.
pub fn dispatch(state: &mut ArenaState, cmd: CollectionCommand) {
    if state.collection.apply(cmd) {
        save::persist(&state.collection);
    }
}

/// The power-sorted view both list screens render.
pub fn sorted_view(state: &ArenaState) -> Vec<Monster> {
    let mut view = state.collection.monsters.clone();
    sort_by_power(&mut view);
    view
}

pub fn switch_tab(state: &mut ArenaState, screen: Screen) {
    state.screen = screen;
    state.status = None;
}

// ── Monsters screen ─────────────────────────────────────────

pub fn focus_row(state: &mut ArenaState, row: usize) {
    if let Some(m) = sorted_view(state).get(row) {
        state.focused = Some(m.id);
    }
}

pub fn heal_focused(state: &mut ArenaState) {
    if let Some(id) = state.focused {
        dispatch(state, CollectionCommand::HealToFull(id));
    }
}

pub fn delete_focused(state: &mut ArenaState) {
    if let Some(id) = state.focused {
        dispatch(state, CollectionCommand::Remove(id));
        state.focused = None;
    }
}

// ── Create screen ───────────────────────────────────────────

/// Validate and add the drafted monster. Returns true when it was added;
/// validation errors stay on the form for the render pass.
pub fn submit_form(state: &mut ArenaState) -> bool {
    match state.form.submit() {
        Some(draft) => {
            let name = draft.name.clone();
            dispatch(state, CollectionCommand::Add(draft));
            state.form = crate::form::MonsterForm::new();
            state.set_status(format!("{} joined the collection", name));
            state.screen = Screen::Monsters;
            true
        }
        None => false,
    }
}

// ── Battle setup ────────────────────────────────────────────

/// Toggle a monster in/out of the two battle slots: clicking a selected
/// monster deselects it, otherwise it fills the first empty slot.
pub fn toggle_selection(state: &mut ArenaState, id: MonsterId) {
    let slots = state.collection.selected;
    if slots[0] == Some(id) || slots[1] == Some(id) {
        state.collection.selected = [
            slots[0].filter(|s| *s != id),
            slots[1].filter(|s| *s != id),
        ];
    } else if slots[0].is_none() {
        dispatch(state, CollectionCommand::SelectFirst(id));
    } else if slots[1].is_none() {
        dispatch(state, CollectionCommand::SelectSecond(id));
    }
}

/// Resolve the battle for the selected pair and enter the arena. The
/// engine's preconditions (alive, distinct) surface as a status message.
pub fn start_battle(state: &mut ArenaState) -> bool {
    let Some((a, b)) = state.collection.selected_pair() else {
        state.set_status("select two monsters first");
        return false;
    };
    let (a, b) = (a.clone(), b.clone());
    match resolve_battle(&a, &b) {
        Ok(result) => {
            state.replay = Some(Replay::new(result, (a, b)));
            state.battle_phase = BattlePhase::Arena;
            state.status = None;
            true
        }
        Err(err) => {
            state.set_status(err.to_string());
            false
        }
    }
}

// ── Replay ──────────────────────────────────────────────────

/// Advance the replay clock. Reveals one round per interval while playing
/// and moves to the result screen once the trace is exhausted.
pub fn tick(state: &mut ArenaState, delta_ticks: u32) {
    if state.battle_phase != BattlePhase::Arena {
        return;
    }
    let Some(replay) = &mut state.replay else {
        return;
    };
    if !replay.playing || replay.finished() {
        return;
    }

    replay.tick_accum += delta_ticks;
    while replay.tick_accum >= REVEAL_INTERVAL_TICKS && !replay.finished() {
        replay.tick_accum -= REVEAL_INTERVAL_TICKS;
        replay.revealed += 1;
    }
    if replay.finished() {
        replay.playing = false;
        finish_battle(state);
    }
}

pub fn toggle_playback(state: &mut ArenaState) {
    if let Some(replay) = &mut state.replay {
        if !replay.finished() {
            replay.playing = !replay.playing;
        }
    }
}

/// Reveal exactly one round (manual stepping while paused).
pub fn step_round(state: &mut ArenaState) {
    let Some(replay) = &mut state.replay else {
        return;
    };
    if replay.finished() {
        return;
    }
    replay.revealed += 1;
    if replay.finished() {
        replay.playing = false;
        finish_battle(state);
    }
}

/// Reveal everything and jump straight to the result.
pub fn skip_to_end(state: &mut ArenaState) {
    let Some(replay) = &mut state.replay else {
        return;
    };
    replay.revealed = replay.result.total_rounds;
    replay.playing = false;
    finish_battle(state);
}

/// Write the final snapshots back to the collection (battle damage
/// persists) and show the result screen. Idempotent per battle.
fn finish_battle(state: &mut ArenaState) {
    let Some(replay) = &mut state.replay else {
        return;
    };
    if !replay.applied {
        replay.applied = true;
        let winner = replay.result.winner.clone();
        let loser = replay.result.loser.clone();
        dispatch(state, CollectionCommand::Update(winner));
        dispatch(state, CollectionCommand::Update(loser));
    }
    state.battle_phase = BattlePhase::Result;
}

/// Abandon the arena without applying anything.
pub fn back_to_setup(state: &mut ArenaState) {
    state.replay = None;
    state.battle_phase = BattlePhase::Setup;
}

/// From the result screen: drop the replay and pick new combatants.
pub fn new_battle(state: &mut ArenaState) {
    state.replay = None;
    state.battle_phase = BattlePhase::Setup;
    dispatch(state, CollectionCommand::ClearSelection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::sample_drafts;

    fn app() -> ArenaState {
        let mut state = ArenaState::new();
        for draft in sample_drafts() {
            state.collection.apply(CollectionCommand::Add(draft));
        }
        state
    }

    fn select_pair(state: &mut ArenaState, a: u64, b: u64) {
        toggle_selection(state, MonsterId(a));
        toggle_selection(state, MonsterId(b));
    }

    #[test]
    fn toggle_selection_fills_then_clears_slots() {
        let mut state = app();
        toggle_selection(&mut state, MonsterId(1));
        assert_eq!(state.collection.selected[0], Some(MonsterId(1)));
        toggle_selection(&mut state, MonsterId(2));
        assert_eq!(state.collection.selected[1], Some(MonsterId(2)));
        // Clicking again deselects
        toggle_selection(&mut state, MonsterId(1));
        assert_eq!(state.collection.selected[0], None);
        // Third monster takes the freed slot
        toggle_selection(&mut state, MonsterId(3));
        assert_eq!(state.collection.selected[0], Some(MonsterId(3)));
    }

    #[test]
    fn start_battle_requires_two_selected() {
        let mut state = app();
        assert!(!start_battle(&mut state));
        assert!(state.status.is_some());
        select_pair(&mut state, 1, 2);
        assert!(start_battle(&mut state));
        assert_eq!(state.battle_phase, BattlePhase::Arena);
        assert!(state.replay.is_some());
    }

    #[test]
    fn start_battle_rejects_defeated_monster() {
        let mut state = app();
        let mut dead = state.collection.monsters[0].clone();
        dead.hp = 0;
        state.collection.apply(CollectionCommand::Update(dead));
        select_pair(&mut state, 1, 2);
        assert!(!start_battle(&mut state));
        assert!(state.status.as_deref().unwrap().contains("defeated"));
        assert_eq!(state.battle_phase, BattlePhase::Setup);
    }

    #[test]
    fn replay_reveals_on_interval_and_finishes() {
        let mut state = app();
        // Dragão (id 1) vs Lobo (id 2): the 4-round reference battle
        select_pair(&mut state, 1, 2);
        start_battle(&mut state);
        toggle_playback(&mut state);

        tick(&mut state, REVEAL_INTERVAL_TICKS);
        assert_eq!(state.replay.as_ref().unwrap().revealed, 1);

        // Three more intervals: all 4 rounds revealed, result screen shown
        tick(&mut state, REVEAL_INTERVAL_TICKS * 3);
        let replay = state.replay.as_ref().unwrap();
        assert!(replay.finished());
        assert!(!replay.playing);
        assert_eq!(state.battle_phase, BattlePhase::Result);
    }

    #[test]
    fn finished_battle_writes_damage_back_to_collection() {
        let mut state = app();
        select_pair(&mut state, 1, 2);
        start_battle(&mut state);
        skip_to_end(&mut state);

        // A (Dragão) wins at 90 hp; B (Lobo) is at 0
        assert_eq!(state.collection.get(MonsterId(1)).unwrap().hp, 90);
        assert_eq!(state.collection.get(MonsterId(2)).unwrap().hp, 0);
        assert_eq!(state.battle_phase, BattlePhase::Result);
    }

    #[test]
    fn step_round_is_manual_reveal() {
        let mut state = app();
        select_pair(&mut state, 1, 2);
        start_battle(&mut state);
        step_round(&mut state);
        step_round(&mut state);
        assert_eq!(state.replay.as_ref().unwrap().revealed, 2);
        // Clock doesn't move a paused replay
        tick(&mut state, 100);
        assert_eq!(state.replay.as_ref().unwrap().revealed, 2);
    }

    #[test]
    fn damage_is_applied_once_even_if_skipped_twice() {
        let mut state = app();
        select_pair(&mut state, 1, 2);
        start_battle(&mut state);
        skip_to_end(&mut state);
        let hp_after = state.collection.get(MonsterId(1)).unwrap().hp;
        skip_to_end(&mut state);
        assert_eq!(state.collection.get(MonsterId(1)).unwrap().hp, hp_after);
    }

    #[test]
    fn back_to_setup_discards_unfinished_replay() {
        let mut state = app();
        select_pair(&mut state, 1, 2);
        start_battle(&mut state);
        step_round(&mut state);
        back_to_setup(&mut state);
        assert!(state.replay.is_none());
        // No write-back happened
        assert_eq!(state.collection.get(MonsterId(1)).unwrap().hp, 120);
        assert_eq!(state.collection.get(MonsterId(2)).unwrap().hp, 80);
    }

    #[test]
    fn new_battle_clears_selection() {
        let mut state = app();
        select_pair(&mut state, 1, 2);
        start_battle(&mut state);
        skip_to_end(&mut state);
        new_battle(&mut state);
        assert_eq!(state.collection.selected, [None, None]);
        assert_eq!(state.battle_phase, BattlePhase::Setup);
    }

    #[test]
    fn submit_form_adds_monster_and_returns_to_list() {
        let mut state = app();
        state.form.name = "Kraken".into();
        state.form.attack = "100".into();
        state.form.defense = "80".into();
        state.form.speed = "40".into();
        state.form.hp = "300".into();
        assert!(submit_form(&mut state));
        assert_eq!(state.collection.monsters.len(), 5);
        assert_eq!(state.screen, Screen::Monsters);
        assert!(state.form.name.is_empty());
    }

    #[test]
    fn submit_form_keeps_errors_on_screen() {
        let mut state = app();
        state.screen = Screen::Create;
        state.form.name = "X".into();
        assert!(!submit_form(&mut state));
        assert_eq!(state.screen, Screen::Create);
        assert!(!state.form.errors.is_empty());
    }

    #[test]
    fn heal_and_delete_operate_on_focused_row() {
        let mut state = app();
        // Sorted by power: Dragão 335, Golem 330, Fênix 330, Lobo 295.
        focus_row(&mut state, 0);
        assert_eq!(state.focused, Some(MonsterId(1)));

        let mut damaged = state.collection.monsters[0].clone();
        damaged.hp = 10;
        state.collection.apply(CollectionCommand::Update(damaged));
        heal_focused(&mut state);
        assert_eq!(state.collection.get(MonsterId(1)).unwrap().hp, 120);

        delete_focused(&mut state);
        assert!(state.collection.get(MonsterId(1)).is_none());
        assert_eq!(state.focused, None);
    }
}
