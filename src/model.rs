//! Programmer and user records, plus the client-facing representation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Programmer {
    pub id: i64,
    pub nickname: String,
    pub avatar_number: Option<i32>,
    pub tag_line: Option<String>,
    pub power_level: i32,
    pub user_id: i64,
}

/// Row to insert; `power_level` starts at zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProgrammer {
    pub nickname: String,
    pub avatar_number: Option<i32>,
    pub tag_line: Option<String>,
    pub user_id: i64,
}

/// Writable fields of an update. `None` leaves the field untouched,
/// `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgrammerChanges {
    pub avatar_number: Option<Option<i32>>,
    pub tag_line: Option<Option<String>>,
}

impl Programmer {
    pub fn apply(&mut self, changes: ProgrammerChanges) {
        if let Some(avatar_number) = changes.avatar_number {
            self.avatar_number = avatar_number;
        }
        if let Some(tag_line) = changes.tag_line {
            self.tag_line = tag_line;
        }
    }
}

impl NewProgrammer {
    pub fn new(nickname: String, changes: ProgrammerChanges, owner: &User) -> Self {
        NewProgrammer {
            nickname,
            avatar_number: changes.avatar_number.flatten(),
            tag_line: changes.tag_line.flatten(),
            user_id: owner.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammerRepresentation {
    pub nickname: String,
    pub avatar_number: Option<i32>,
    pub power_level: i32,
    pub tag_line: Option<String>,
}

impl From<&Programmer> for ProgrammerRepresentation {
    fn from(p: &Programmer) -> Self {
        ProgrammerRepresentation {
            nickname: p.nickname.clone(),
            avatar_number: p.avatar_number,
            power_level: p.power_level,
            tag_line: p.tag_line.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgrammerCollection {
    pub programmers: Vec<ProgrammerRepresentation>,
}
