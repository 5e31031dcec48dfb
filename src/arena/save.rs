//! Collection persistence in localStorage.
//!
//! ## Versioning policy
//!
//! - `SAVE_VERSION`: current save format version; bump when adding fields.
//! - `MIN_COMPATIBLE_VERSION`: oldest version we can still load. Additive
//!   changes keep it unchanged (missing fields get defaults via
//!   `#[serde(default)]`); only breaking changes raise it.
//!
//! The whole list is re-serialized on every collection mutation, under a
//! single well-known key. Storage access is wasm-only; extract/apply stays
//! testable natively.

#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};

use crate::collection::{CollectionCommand, CollectionState};
use crate::monster::{sample_drafts, Monster};

#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;

#[cfg(any(target_arch = "wasm32", test))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "monster-battle-data";

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    collection: CollectionSave,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct CollectionSave {
    monsters: Vec<Monster>,
    next_id: u64,
}

#[cfg(any(target_arch = "wasm32", test))]
fn extract_save(state: &CollectionState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        collection: CollectionSave {
            monsters: state.monsters.clone(),
            next_id: state.next_id,
        },
    }
}

#[cfg(any(target_arch = "wasm32", test))]
fn apply_save(state: &mut CollectionState, save: CollectionSave) {
    state.apply(CollectionCommand::Load(save.monsters));
    state.next_id = state.next_id.max(save.next_id);
}

/// Seed the fixed sample set into an empty collection (first run, or a
/// discarded save).
pub fn seed_samples(state: &mut CollectionState) {
    for draft in sample_drafts() {
        state.apply(CollectionCommand::Add(draft));
    }
}

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist the collection. Failures are logged to the console and
/// otherwise ignored; the in-memory state stays authoritative.
#[cfg(target_arch = "wasm32")]
pub fn persist(state: &CollectionState) {
    let json = match serde_json::to_string(&extract_save(state)) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("monster-arena: save serialization failed: {e}").into());
            return;
        }
    };
    if let Some(storage) = storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("monster-arena: localStorage write failed: {e:?}").into(),
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn persist(_state: &CollectionState) {}

/// Restore the collection from localStorage. Returns false (leaving the
/// state untouched) when there is no save, it fails to parse, or its
/// version is too old; corrupt data is deleted so the next run reseeds.
#[cfg(target_arch = "wasm32")]
pub fn restore(state: &mut CollectionState) -> bool {
    let Some(storage) = storage() else {
        return false;
    };
    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return false,
    };

    let save: SaveData = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("monster-arena: discarding unreadable save: {e}").into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            return false;
        }
    };

    if save.version < MIN_COMPATIBLE_VERSION {
        web_sys::console::log_1(
            &format!(
                "monster-arena: save too old (saved={}, min_compatible={}), starting fresh",
                save.version, MIN_COMPATIBLE_VERSION
            )
            .into(),
        );
        let _ = storage.remove_item(STORAGE_KEY);
        return false;
    }

    apply_save(state, save.collection);
    true
}

#[cfg(not(target_arch = "wasm32"))]
pub fn restore(_state: &mut CollectionState) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::MonsterId;

    #[test]
    fn extract_and_apply_roundtrip() {
        let mut original = CollectionState::new();
        seed_samples(&mut original);
        original.apply(CollectionCommand::Remove(MonsterId(2)));
        let mut damaged = original.monsters[0].clone();
        damaged.hp = 33;
        original.apply(CollectionCommand::Update(damaged));

        let save = extract_save(&original);
        let mut restored = CollectionState::new();
        apply_save(&mut restored, save.collection);

        assert_eq!(restored.monsters, original.monsters);
        assert_eq!(restored.next_id, original.next_id);
        assert_eq!(restored.get(MonsterId(1)).unwrap().hp, 33);
    }

    #[test]
    fn roundtrip_survives_json() {
        let mut original = CollectionState::new();
        seed_samples(&mut original);

        let json = serde_json::to_string(&extract_save(&original)).unwrap();
        let save: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(save.version, SAVE_VERSION);

        let mut restored = CollectionState::new();
        apply_save(&mut restored, save.collection);
        assert_eq!(restored.monsters, original.monsters);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        // A future save with only a version still parses
        let save: SaveData = serde_json::from_str(r#"{"version":1,"collection":{}}"#).unwrap();
        assert!(save.collection.monsters.is_empty());
        assert_eq!(save.collection.next_id, 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"version":1,"collection":{"monsters":[],"next_id":9,"theme":"dark"}}"#;
        let save: SaveData = serde_json::from_str(json).unwrap();
        assert_eq!(save.collection.next_id, 9);
    }

    #[test]
    fn applied_save_never_lowers_next_id() {
        let mut state = CollectionState::new();
        seed_samples(&mut state); // next_id = 5
        apply_save(
            &mut state,
            CollectionSave {
                monsters: Vec::new(),
                next_id: 2,
            },
        );
        assert_eq!(state.next_id, 5);
    }

    #[test]
    fn seed_creates_the_fixed_sample_set() {
        let mut state = CollectionState::new();
        seed_samples(&mut state);
        assert_eq!(state.monsters.len(), 4);
        assert!(state.monsters.iter().all(|m| m.hp == m.max_hp));
    }
}
