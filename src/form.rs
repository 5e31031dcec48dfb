//! Monster creation form — string fields, per-field validation, and
//! conversion into a validated [`MonsterDraft`].
//!
//! All input-shape errors live here; by the time a draft reaches the
//! collection store or the battle engine its stats are in bounds.

use crate::monster::{MonsterDraft, HP_MAX, HP_MIN, STAT_MAX, STAT_MIN};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;

/// The editable fields, in navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Attack,
    Defense,
    Speed,
    Hp,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::Attack, Field::Defense, Field::Speed, Field::Hp]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Attack => "Attack",
            Field::Defense => "Defense",
            Field::Speed => "Speed",
            Field::Hp => "HP",
        }
    }

    /// Hint shown next to the input.
    pub fn hint(&self) -> &'static str {
        match self {
            Field::Name => "2-50 characters",
            Field::Attack | Field::Defense | Field::Speed => "1-200",
            Field::Hp => "1-1000",
        }
    }
}

/// Raw form state as typed by the user.
#[derive(Clone, Debug, Default)]
pub struct MonsterForm {
    pub name: String,
    pub attack: String,
    pub defense: String,
    pub speed: String,
    pub hp: String,
    /// Which field currently receives key input.
    pub active: usize,
    /// Validation errors from the last submit attempt, in field order.
    pub errors: Vec<(Field, String)>,
}

impl MonsterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_field(&self) -> Field {
        Field::all()[self.active.min(Field::all().len() - 1)]
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Attack => &mut self.attack,
            Field::Defense => &mut self.defense,
            Field::Speed => &mut self.speed,
            Field::Hp => &mut self.hp,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Attack => &self.attack,
            Field::Defense => &self.defense,
            Field::Speed => &self.speed,
            Field::Hp => &self.hp,
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    /// Type one character into the active field. Stat fields only accept
    /// digits; the name field takes anything printable up to its limit.
    pub fn push_char(&mut self, ch: char) {
        let field = self.active_field();
        let value = self.value_mut(field);
        match field {
            Field::Name => {
                if value.chars().count() < NAME_MAX_LEN {
                    value.push(ch);
                }
            }
            _ => {
                if ch.is_ascii_digit() && value.len() < 4 {
                    value.push(ch);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        let field = self.active_field();
        self.value_mut(field).pop();
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % Field::all().len();
    }

    pub fn set_active(&mut self, index: usize) {
        if index < Field::all().len() {
            self.active = index;
        }
    }

    /// Validate every field. On success returns the draft; on failure
    /// records per-field errors and returns None.
    pub fn submit(&mut self) -> Option<MonsterDraft> {
        let mut errors: Vec<(Field, String)> = Vec::new();

        let name = self.name.trim().to_string();
        let name_len = name.chars().count();
        if name.is_empty() {
            errors.push((Field::Name, "name is required".into()));
        } else if name_len < NAME_MIN_LEN {
            errors.push((Field::Name, format!("name needs at least {} characters", NAME_MIN_LEN)));
        } else if name_len > NAME_MAX_LEN {
            errors.push((Field::Name, format!("name is limited to {} characters", NAME_MAX_LEN)));
        }

        let attack = parse_stat(&self.attack, Field::Attack, STAT_MIN, STAT_MAX, &mut errors);
        let defense = parse_stat(&self.defense, Field::Defense, STAT_MIN, STAT_MAX, &mut errors);
        let speed = parse_stat(&self.speed, Field::Speed, STAT_MIN, STAT_MAX, &mut errors);
        let max_hp = parse_stat(&self.hp, Field::Hp, HP_MIN, HP_MAX, &mut errors);

        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        Some(MonsterDraft {
            name,
            attack: attack?,
            defense: defense?,
            speed: speed?,
            max_hp: max_hp?,
        })
    }
}

fn parse_stat(
    raw: &str,
    field: Field,
    min: u32,
    max: u32,
    errors: &mut Vec<(Field, String)>,
) -> Option<u32> {
    let label = field.label().to_lowercase();
    match raw.trim().parse::<u32>() {
        Err(_) => {
            errors.push((field, format!("{} must be a number", label)));
            None
        }
        Ok(v) if v < min => {
            errors.push((field, format!("{} must be at least {}", label, min)));
            None
        }
        Ok(v) if v > max => {
            errors.push((field, format!("{} must be at most {}", label, max)));
            None
        }
        Ok(v) => Some(v),
    }
}
