//! Monster Arena — collection management and battle replay.
//!
//! Input dispatch lives here; state transitions in [`logic`]; all drawing
//! in [`render`]. The battle engine (`crate::battle`) is only ever called
//! from `logic::start_battle` with snapshots passed by value.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use state::{ArenaState, BattlePhase, Screen};

pub struct ArenaApp {
    pub state: ArenaState,
}

impl ArenaApp {
    /// Restore the collection from storage, seeding the sample set on
    /// first run (or when the save was discarded).
    pub fn new() -> Self {
        let mut state = ArenaState::new();
        if !save::restore(&mut state.collection) {
            save::seed_samples(&mut state.collection);
            save::persist(&state.collection);
        }
        Self { state }
    }

    /// Handle one normalized input event. Returns true if consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Key(ch) => self.handle_key(*ch),
            InputEvent::Backspace => {
                if self.state.screen == Screen::Create {
                    self.state.form.backspace();
                    true
                } else {
                    false
                }
            }
            InputEvent::Enter => {
                if self.state.screen == Screen::Create {
                    // Last field submits, any other advances
                    if self.state.form.active + 1 == crate::form::Field::all().len() {
                        logic::submit_form(&mut self.state);
                    } else {
                        self.state.form.next_field();
                    }
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Advance the replay clock.
    pub fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    fn handle_click(&mut self, id: u16) -> bool {
        let state = &mut self.state;
        match id {
            TAB_MONSTERS => logic::switch_tab(state, Screen::Monsters),
            TAB_CREATE => logic::switch_tab(state, Screen::Create),
            TAB_BATTLE => logic::switch_tab(state, Screen::Battle),

            MONSTER_HEAL => logic::heal_focused(state),
            MONSTER_DELETE => logic::delete_focused(state),

            FORM_SUBMIT => {
                logic::submit_form(state);
            }
            FORM_CLEAR => state.form = crate::form::MonsterForm::new(),

            SETUP_START => {
                logic::start_battle(state);
            }
            SETUP_CLEAR => {
                logic::dispatch(state, crate::collection::CollectionCommand::ClearSelection)
            }

            REPLAY_TOGGLE => logic::toggle_playback(state),
            REPLAY_STEP => logic::step_round(state),
            REPLAY_SKIP => logic::skip_to_end(state),
            REPLAY_BACK => logic::back_to_setup(state),

            RESULT_NEW_BATTLE => logic::new_battle(state),
            RESULT_TO_MONSTERS => {
                logic::new_battle(state);
                logic::switch_tab(state, Screen::Monsters);
            }

            id if (MONSTER_ROW_BASE..MONSTER_ROW_BASE + 50).contains(&id) => {
                logic::focus_row(state, (id - MONSTER_ROW_BASE) as usize)
            }
            id if (FORM_FIELD_BASE..FORM_FIELD_BASE + 5).contains(&id) => {
                state.form.set_active((id - FORM_FIELD_BASE) as usize)
            }
            id if (SETUP_ROW_BASE..SETUP_ROW_BASE + 50).contains(&id) => {
                let row = (id - SETUP_ROW_BASE) as usize;
                if let Some(m) = logic::sorted_view(state).get(row) {
                    logic::toggle_selection(state, m.id);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_key(&mut self, ch: char) -> bool {
        // Create screen owns the keyboard for text entry
        if self.state.screen == Screen::Create {
            self.state.form.push_char(ch);
            return true;
        }

        let state = &mut self.state;
        match state.screen {
            Screen::Monsters => match ch {
                '1'..='9' => {
                    logic::focus_row(state, ch as usize - '1' as usize);
                    true
                }
                'h' | 'H' => {
                    logic::heal_focused(state);
                    true
                }
                'd' | 'D' => {
                    logic::delete_focused(state);
                    true
                }
                'c' | 'C' => {
                    logic::switch_tab(state, Screen::Create);
                    true
                }
                'b' | 'B' => {
                    logic::switch_tab(state, Screen::Battle);
                    true
                }
                _ => false,
            },
            Screen::Create => unreachable!("handled above"),
            Screen::Battle => match state.battle_phase {
                BattlePhase::Setup => match ch {
                    '1'..='9' => {
                        let row = ch as usize - '1' as usize;
                        if let Some(m) = logic::sorted_view(state).get(row) {
                            logic::toggle_selection(state, m.id);
                        }
                        true
                    }
                    's' | 'S' => {
                        logic::start_battle(state);
                        true
                    }
                    'c' | 'C' => {
                        logic::dispatch(
                            state,
                            crate::collection::CollectionCommand::ClearSelection,
                        );
                        true
                    }
                    'm' | 'M' => {
                        logic::switch_tab(state, Screen::Monsters);
                        true
                    }
                    _ => false,
                },
                BattlePhase::Arena => match ch {
                    'p' | 'P' | ' ' => {
                        logic::toggle_playback(state);
                        true
                    }
                    'n' | 'N' => {
                        logic::step_round(state);
                        true
                    }
                    'e' | 'E' => {
                        logic::skip_to_end(state);
                        true
                    }
                    'q' | 'Q' => {
                        logic::back_to_setup(state);
                        true
                    }
                    _ => false,
                },
                BattlePhase::Result => match ch {
                    'n' | 'N' => {
                        logic::new_battle(state);
                        true
                    }
                    'm' | 'M' => {
                        logic::new_battle(state);
                        logic::switch_tab(state, Screen::Monsters);
                        true
                    }
                    _ => false,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::MonsterId;

    fn app() -> ArenaApp {
        // Native `new()` never finds a save, so it seeds the sample set
        ArenaApp::new()
    }

    #[test]
    fn new_app_is_seeded_with_samples() {
        let app = app();
        assert_eq!(app.state.collection.monsters.len(), 4);
    }

    #[test]
    fn tab_clicks_switch_screens() {
        let mut app = app();
        app.handle_input(&InputEvent::Click(TAB_CREATE));
        assert_eq!(app.state.screen, Screen::Create);
        app.handle_input(&InputEvent::Click(TAB_BATTLE));
        assert_eq!(app.state.screen, Screen::Battle);
        app.handle_input(&InputEvent::Click(TAB_MONSTERS));
        assert_eq!(app.state.screen, Screen::Monsters);
    }

    #[test]
    fn create_screen_captures_typed_text() {
        let mut app = app();
        app.handle_input(&InputEvent::Click(TAB_CREATE));
        for ch in "Imp".chars() {
            app.handle_input(&InputEvent::Key(ch));
        }
        assert_eq!(app.state.form.name, "Imp");
        app.handle_input(&InputEvent::Backspace);
        assert_eq!(app.state.form.name, "Im");
    }

    #[test]
    fn enter_walks_fields_and_submits_from_last() {
        let mut app = app();
        app.handle_input(&InputEvent::Click(TAB_CREATE));
        for ch in "Imp".chars() {
            app.handle_input(&InputEvent::Key(ch));
        }
        for digits in ["50", "40", "60", "90"] {
            app.handle_input(&InputEvent::Enter);
            for ch in digits.chars() {
                app.handle_input(&InputEvent::Key(ch));
            }
        }
        app.handle_input(&InputEvent::Enter); // submit from hp field
        assert_eq!(app.state.collection.monsters.len(), 5);
        assert_eq!(app.state.screen, Screen::Monsters);
    }

    #[test]
    fn full_battle_flow_through_input_events() {
        let mut app = app();
        app.handle_input(&InputEvent::Key('b'));
        // Rows are power-sorted: row 1 = Dragão, row 4 = Lobo
        app.handle_input(&InputEvent::Key('1'));
        app.handle_input(&InputEvent::Key('4'));
        app.handle_input(&InputEvent::Key('s'));
        assert_eq!(app.state.battle_phase, BattlePhase::Arena);

        app.handle_input(&InputEvent::Key('e')); // skip to end
        assert_eq!(app.state.battle_phase, BattlePhase::Result);
        assert_eq!(app.state.collection.get(MonsterId(2)).unwrap().hp, 0);

        app.handle_input(&InputEvent::Key('n'));
        assert_eq!(app.state.battle_phase, BattlePhase::Setup);
        assert_eq!(app.state.collection.selected, [None, None]);
    }

    #[test]
    fn setup_click_toggles_selection() {
        let mut app = app();
        app.handle_input(&InputEvent::Click(TAB_BATTLE));
        app.handle_input(&InputEvent::Click(SETUP_ROW_BASE));
        assert_eq!(app.state.collection.selected[0], Some(MonsterId(1)));
        app.handle_input(&InputEvent::Click(SETUP_ROW_BASE));
        assert_eq!(app.state.collection.selected[0], None);
    }

    #[test]
    fn unknown_click_id_is_not_consumed() {
        let mut app = app();
        assert!(!app.handle_input(&InputEvent::Click(9999)));
    }

    #[test]
    fn arena_keys_ignored_outside_arena() {
        let mut app = app();
        app.handle_input(&InputEvent::Key('b'));
        // 'p' means nothing during setup
        assert!(!app.handle_input(&InputEvent::Key('p')));
    }
}
