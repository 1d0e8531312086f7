//! Client-side form checks. Failures are `DomainError::Validation` and stay in the form.

use super::entities::{MemoryType, NewMemory, NewReminder, ReminderFrequency};
use super::errors::DomainError;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static email regex"));
static LOWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("static regex"));
static UPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("static regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("static regex"));
static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("static regex"));

const MIN_PASSWORD_LEN: usize = 8;
const MIN_TITLE_LEN: usize = 3;
/// Column width of `memories.title` / `reminders.title` on the backend.
const MAX_TITLE_LEN: usize = 200;

fn check_email(email: &str, errors: &mut Vec<DomainError>) {
    if email.is_empty() {
        errors.push(DomainError::validation("email", "Email is required"));
    } else if !EMAIL_RE.is_match(email) {
        errors.push(DomainError::validation("email", "Email is invalid"));
    }
}

fn check_title(title: &str, errors: &mut Vec<DomainError>) {
    let title = title.trim();
    if title.is_empty() {
        errors.push(DomainError::validation("title", "Title is required"));
    } else if title.chars().count() < MIN_TITLE_LEN {
        errors.push(DomainError::validation(
            "title",
            "Title must be at least 3 characters",
        ));
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push(DomainError::validation(
            "title",
            "Title must be at most 200 characters",
        ));
    }
}

fn first(errors: Vec<DomainError>) -> Result<(), DomainError> {
    match errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Every failing field, in form order.
    pub fn errors(&self) -> Vec<DomainError> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push(DomainError::validation("password", "Password is required"));
        }
        errors
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        first(self.errors())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn errors(&self) -> Vec<DomainError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(DomainError::validation("name", "Name is required"));
        } else if name.chars().count() < 2 {
            errors.push(DomainError::validation(
                "name",
                "Name must be at least 2 characters",
            ));
        }

        check_email(&self.email, &mut errors);

        if self.password.is_empty() {
            errors.push(DomainError::validation("password", "Password is required"));
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(DomainError::validation(
                "password",
                "Password must be at least 8 characters",
            ));
        } else if !(LOWER_RE.is_match(&self.password)
            && UPPER_RE.is_match(&self.password)
            && DIGIT_RE.is_match(&self.password))
        {
            errors.push(DomainError::validation(
                "password",
                "Password must contain uppercase, lowercase, and number",
            ));
        }

        if self.confirm_password.is_empty() {
            errors.push(DomainError::validation(
                "confirm_password",
                "Please confirm your password",
            ));
        } else if self.password != self.confirm_password {
            errors.push(DomainError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }

        errors
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        first(self.errors())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PasswordStrength::VeryWeak => "Very Weak",
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Fair => "Fair",
            PasswordStrength::Good => "Good",
            PasswordStrength::Strong => "Strong",
        };
        f.write_str(label)
    }
}

/// Score 0..=5: one point each for length, lowercase, uppercase, digit and symbol.
pub fn password_score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    [
        password.chars().count() >= MIN_PASSWORD_LEN,
        LOWER_RE.is_match(password),
        UPPER_RE.is_match(password),
        DIGIT_RE.is_match(password),
        SYMBOL_RE.is_match(password),
    ]
    .iter()
    .filter(|hit| **hit)
    .count() as u8
}

pub fn password_strength(password: &str) -> PasswordStrength {
    match password_score(password) {
        0 => PasswordStrength::VeryWeak,
        1 => PasswordStrength::Weak,
        2 => PasswordStrength::Fair,
        3 => PasswordStrength::Good,
        _ => PasswordStrength::Strong,
    }
}

#[derive(Debug, Clone)]
pub struct MemoryForm {
    pub title: String,
    pub content: String,
    pub memory_type: MemoryType,
    pub importance_level: u8,
    pub tags: Vec<String>,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            memory_type: MemoryType::Note,
            importance_level: 1,
            tags: Vec::new(),
        }
    }
}

impl MemoryForm {
    /// Tags are stored trimmed, lowercased and without duplicates.
    pub fn add_tag(&mut self, raw: &str) {
        let tag = raw.trim().to_lowercase();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn errors(&self) -> Vec<DomainError> {
        let mut errors = Vec::new();
        check_title(&self.title, &mut errors);
        if self.content.trim().is_empty() {
            errors.push(DomainError::validation("content", "Content is required"));
        }
        if !(1..=5).contains(&self.importance_level) {
            errors.push(DomainError::validation(
                "importance_level",
                "Importance must be between 1 and 5",
            ));
        }
        errors
    }

    /// Validate and build the request body.
    pub fn into_new_memory(self) -> Result<NewMemory, DomainError> {
        first(self.errors())?;
        Ok(NewMemory {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            memory_type: self.memory_type,
            importance_level: self.importance_level,
            tags: self.tags,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReminderForm {
    pub title: String,
    pub description: String,
    pub trigger_date: Option<DateTime<Utc>>,
    pub frequency: ReminderFrequency,
    pub memory_id: Option<i64>,
}

impl ReminderForm {
    /// `now` is passed in so the future-date rule stays deterministic under test.
    pub fn errors(&self, now: DateTime<Utc>) -> Vec<DomainError> {
        let mut errors = Vec::new();
        check_title(&self.title, &mut errors);
        match self.trigger_date {
            None => errors.push(DomainError::validation("trigger_date", "Date is required")),
            Some(at) if at <= now => errors.push(DomainError::validation(
                "trigger_date",
                "Date must be in the future",
            )),
            Some(_) => {}
        }
        errors
    }

    pub fn into_new_reminder(self, now: DateTime<Utc>) -> Result<NewReminder, DomainError> {
        first(self.errors(now))?;
        let trigger_date = self
            .trigger_date
            .ok_or_else(|| DomainError::validation("trigger_date", "Date is required"))?;
        Ok(NewReminder {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            trigger_date,
            frequency: self.frequency,
            memory_id: self.memory_id,
        })
    }
}
