//! Semantic action ids for click targets.
//!
//! Registered during render, dispatched via `InputEvent::Click`.

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_MONSTERS: u16 = 1;
pub const TAB_CREATE: u16 = 2;
pub const TAB_BATTLE: u16 = 3;

// ── Monsters screen ─────────────────────────────────────────────
/// Base + row index into the power-sorted list.
pub const MONSTER_ROW_BASE: u16 = 100;
pub const MONSTER_HEAL: u16 = 20;
pub const MONSTER_DELETE: u16 = 21;

// ── Create screen ───────────────────────────────────────────────
/// Base + field index (see `form::Field::all`).
pub const FORM_FIELD_BASE: u16 = 200;
pub const FORM_SUBMIT: u16 = 30;
pub const FORM_CLEAR: u16 = 31;

// ── Battle setup ────────────────────────────────────────────────
/// Base + row index into the power-sorted list.
pub const SETUP_ROW_BASE: u16 = 300;
pub const SETUP_START: u16 = 40;
pub const SETUP_CLEAR: u16 = 41;

// ── Battle replay ───────────────────────────────────────────────
pub const REPLAY_TOGGLE: u16 = 50;
pub const REPLAY_STEP: u16 = 51;
pub const REPLAY_SKIP: u16 = 52;
pub const REPLAY_BACK: u16 = 53;

// ── Battle result ───────────────────────────────────────────────
pub const RESULT_NEW_BATTLE: u16 = 60;
pub const RESULT_TO_MONSTERS: u16 = 61;
