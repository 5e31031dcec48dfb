//! Collection store — the persisted monster list and battle selection.
//!
//! All mutation goes through [`CollectionCommand`] and a single transition
//! function, so every change the persistence layer needs to observe happens
//! in one place. The battle engine never touches this state; callers pass
//! monster snapshots by value.

use crate::monster::{Monster, MonsterDraft, MonsterId};

/// Enumerated mutation commands for the collection.
#[derive(Clone, Debug)]
pub enum CollectionCommand {
    /// Add a new monster; the store assigns the next id.
    Add(MonsterDraft),
    Remove(MonsterId),
    /// Replace the stored monster with the same id (e.g. post-battle hp).
    Update(Monster),
    SelectFirst(MonsterId),
    SelectSecond(MonsterId),
    ClearSelection,
    /// Restore a monster to `max_hp`. The only non-battle hp mutation.
    HealToFull(MonsterId),
    /// Replace the whole list (load from storage or sample seeding).
    Load(Vec<Monster>),
}

pub struct CollectionState {
    pub monsters: Vec<Monster>,
    /// The two battle slots. Holds ids, not snapshots, so the list stays
    /// the single source of truth.
    pub selected: [Option<MonsterId>; 2],
    /// Next id to assign. Persisted so ids are never reused after removal.
    pub next_id: u64,
}

impl CollectionState {
    pub fn new() -> Self {
        Self {
            monsters: Vec::new(),
            selected: [None, None],
            next_id: 1,
        }
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// Both selected monsters, if both slots are filled and still present.
    pub fn selected_pair(&self) -> Option<(&Monster, &Monster)> {
        match (self.selected[0], self.selected[1]) {
            (Some(a), Some(b)) => Some((self.get(a)?, self.get(b)?)),
            _ => None,
        }
    }

    /// Apply one command. Returns true if the monster list changed in a way
    /// the persistence layer must observe (selection changes don't count).
    pub fn apply(&mut self, cmd: CollectionCommand) -> bool {
        match cmd {
            CollectionCommand::Add(draft) => {
                let id = MonsterId(self.next_id);
                self.next_id += 1;
                self.monsters.push(Monster::from_draft(id, draft));
                true
            }
            CollectionCommand::Remove(id) => {
                let before = self.monsters.len();
                self.monsters.retain(|m| m.id != id);
                for slot in &mut self.selected {
                    if *slot == Some(id) {
                        *slot = None;
                    }
                }
                before != self.monsters.len()
            }
            CollectionCommand::Update(updated) => {
                match self.monsters.iter_mut().find(|m| m.id == updated.id) {
                    Some(slot) => {
                        *slot = updated;
                        true
                    }
                    None => false,
                }
            }
            CollectionCommand::SelectFirst(id) => {
                if self.get(id).is_some() {
                    self.selected[0] = Some(id);
                }
                false
            }
            CollectionCommand::SelectSecond(id) => {
                if self.get(id).is_some() {
                    self.selected[1] = Some(id);
                }
                false
            }
            CollectionCommand::ClearSelection => {
                self.selected = [None, None];
                false
            }
            CollectionCommand::HealToFull(id) => {
                match self.monsters.iter_mut().find(|m| m.id == id) {
                    Some(m) if m.hp < m.max_hp => {
                        m.hp = m.max_hp;
                        true
                    }
                    _ => false,
                }
            }
            CollectionCommand::Load(monsters) => {
                // Keep next_id ahead of every loaded id.
                let max_id = monsters.iter().map(|m| m.id.0).max().unwrap_or(0);
                self.next_id = self.next_id.max(max_id + 1);
                self.monsters = monsters;
                self.selected = [None, None];
                true
            }
        }
    }
}
