//! Binding and validation of programmer write payloads.

use crate::error::AppError;
use crate::model::ProgrammerChanges;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name -> messages, only for fields that failed.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const NICKNAME_REQUIRED: &str = "Please enter a clever nickname";
pub const NICKNAME_TAKEN: &str = "A programmer with that nickname already exists";
pub const INVALID_VALUE: &str = "This value is not valid.";

const AVATAR_RANGE: std::ops::RangeInclusive<i64> = 1..=6;

/// How missing fields are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    /// POST: nickname required, missing fields take their defaults.
    Create,
    /// PUT: missing fields reset to their defaults.
    Replace,
    /// PATCH: missing fields are left as they are.
    Patch,
}

impl SubmitMode {
    fn clears_missing(self) -> bool {
        !matches!(self, SubmitMode::Patch)
    }
}

/// A bound payload with every error found, not just the first one.
#[derive(Debug, Default)]
pub struct Submission {
    nickname: Option<String>,
    changes: ProgrammerChanges,
    errors: FieldErrors,
}

impl Submission {
    /// Bind `body` to the writable fields. `nickname` is only read on create and
    /// `powerLevel` is never read.
    pub fn bind(body: &Map<String, Value>, mode: SubmitMode) -> Self {
        let mut submission = Submission::default();
        let clear_missing = mode.clears_missing();

        if mode == SubmitMode::Create {
            match body.get("nickname").and_then(Value::as_str) {
                Some(s) if !s.trim().is_empty() => submission.nickname = Some(s.to_string()),
                _ => submission.add_error("nickname", NICKNAME_REQUIRED),
            }
        }

        match body.get("avatarNumber") {
            Some(v) => match avatar_number(v) {
                Ok(n) => submission.changes.avatar_number = Some(n),
                Err(()) => submission.add_error("avatarNumber", INVALID_VALUE),
            },
            None if clear_missing => submission.changes.avatar_number = Some(None),
            None => {}
        }

        match body.get("tagLine") {
            Some(Value::Null) => submission.changes.tag_line = Some(None),
            Some(Value::String(s)) => submission.changes.tag_line = Some(Some(s.clone())),
            Some(_) => submission.add_error("tagLine", INVALID_VALUE),
            None if clear_missing => submission.changes.tag_line = Some(None),
            None => {}
        }

        submission
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Nickname and initial values of a valid create submission.
    pub fn into_create(mut self) -> Result<(String, ProgrammerChanges), AppError> {
        match self.nickname.take() {
            Some(nickname) if self.errors.is_empty() => Ok((nickname, self.changes)),
            Some(_) => Err(AppError::Validation(self.errors)),
            None => {
                if !self.errors.contains_key("nickname") {
                    self.add_error("nickname", NICKNAME_REQUIRED);
                }
                Err(AppError::Validation(self.errors))
            }
        }
    }

    pub fn into_changes(self) -> Result<ProgrammerChanges, AppError> {
        if self.errors.is_empty() {
            Ok(self.changes)
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Integers and integer strings in 1..=6; null clears.
fn avatar_number(v: &Value) -> Result<Option<i32>, ()> {
    let n = match v {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if AVATAR_RANGE.contains(&n) => i32::try_from(n).map(Some).map_err(|_| ()),
        _ => Err(()),
    }
}
