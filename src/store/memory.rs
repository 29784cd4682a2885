//! In-process store for local runs and tests.

use super::{nickname_taken, ProgrammerStore};
use crate::error::AppError;
use crate::model::{NewProgrammer, Programmer, User};
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    programmers: Vec<Programmer>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one user already present.
    pub fn with_user(username: &str) -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.write() {
            let id = tables.next_id();
            tables.users.push(User {
                id,
                username: username.to_string(),
            });
        }
        store
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl ProgrammerStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Programmer>, AppError> {
        Ok(self
            .read()?
            .programmers
            .iter()
            .find(|p| p.nickname == nickname)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Programmer>, AppError> {
        Ok(self.read()?.programmers.clone())
    }

    async fn insert(&self, programmer: NewProgrammer) -> Result<Programmer, AppError> {
        let mut tables = self.write()?;
        if tables.programmers.iter().any(|p| p.nickname == programmer.nickname) {
            return Err(nickname_taken());
        }
        if !tables.users.iter().any(|u| u.id == programmer.user_id) {
            return Err(AppError::Internal(format!("no user with id {}", programmer.user_id)));
        }
        let row = Programmer {
            id: tables.next_id(),
            nickname: programmer.nickname,
            avatar_number: programmer.avatar_number,
            tag_line: programmer.tag_line,
            power_level: 0,
            user_id: programmer.user_id,
        };
        tables.programmers.push(row.clone());
        Ok(row)
    }

    async fn save(&self, programmer: &Programmer) -> Result<Programmer, AppError> {
        let mut tables = self.write()?;
        let row = tables
            .programmers
            .iter_mut()
            .find(|p| p.id == programmer.id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No programmer found with nickname \"{}\"",
                    programmer.nickname
                ))
            })?;
        row.avatar_number = programmer.avatar_number;
        row.tag_line = programmer.tag_line.clone();
        Ok(row.clone())
    }

    async fn delete_by_nickname(&self, nickname: &str) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let before = tables.programmers.len();
        tables.programmers.retain(|p| p.nickname != nickname);
        Ok(tables.programmers.len() != before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
