//! Form validation
//!
//! Pure checks run by the controllers before anything is sent to the server,
//! plus the small text helpers used to split and format recipe fields.

use std::sync::LazyLock;

use regex::Regex;

use crate::shared::error::ClientError;

static TIME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-1][0-9]|2[0-3]):([0-5][0-9])$").ok());

static SERVINGS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").ok());

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").ok());

/// Characters accepted by the special-character password rule
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const TIME_ZERO_MESSAGE: &str = "Time cannot be 00:00.";
pub const TIME_FORMAT_MESSAGE: &str = "Invalid time format. Use HH:MM.";
pub const SERVINGS_MESSAGE: &str = "Servings should be a positive number.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const REQUIRED_MESSAGE: &str = "All fields are required!";

fn matches(pattern: &LazyLock<Option<Regex>>, s: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(s))
}

/// `HH:MM` between 00:01 and 23:59
pub fn validate_time(s: &str) -> bool {
    matches(&TIME_PATTERN, s) && s != "00:00"
}

/// Message to show under a time field while the user types
///
/// Nothing is reported until five characters have been entered.
pub fn time_error(s: &str) -> Option<&'static str> {
    if s.chars().count() != 5 || validate_time(s) {
        return None;
    }
    if s == "00:00" {
        Some(TIME_ZERO_MESSAGE)
    } else {
        Some(TIME_FORMAT_MESSAGE)
    }
}

/// Positive integer without a leading zero
pub fn validate_servings(s: &str) -> bool {
    matches(&SERVINGS_PATTERN, s)
}

/// Parsed servings, `None` for anything [`validate_servings`] rejects or that
/// overflows
pub fn parse_servings(s: &str) -> Option<u32> {
    if validate_servings(s) {
        s.parse().ok()
    } else {
        None
    }
}

pub fn validate_email(s: &str) -> bool {
    matches(&EMAIL_PATTERN, s)
}

/// Message to show under the email field while the user types
pub fn email_error(s: &str) -> Option<&'static str> {
    if s.is_empty() || validate_email(s) {
        None
    } else {
        Some(EMAIL_MESSAGE)
    }
}

/// A single password-strength rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Digit,
    SpecialCharacter,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 4] = [
        PasswordRule::MinLength,
        PasswordRule::Uppercase,
        PasswordRule::Digit,
        PasswordRule::SpecialCharacter,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            PasswordRule::MinLength => "At least 8 characters long",
            PasswordRule::Uppercase => "At least one uppercase letter",
            PasswordRule::Digit => "At least one number",
            PasswordRule::SpecialCharacter => "At least one special character",
        }
    }

    pub fn is_satisfied_by(&self, password: &str) -> bool {
        match self {
            PasswordRule::MinLength => password.chars().count() >= PASSWORD_MIN_LENGTH,
            PasswordRule::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRule::Digit => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::SpecialCharacter => {
                password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c))
            }
        }
    }
}

/// Outcome of one rule for a given password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementStatus {
    pub rule: PasswordRule,
    pub satisfied: bool,
}

pub fn password_requirements(password: &str) -> Vec<RequirementStatus> {
    PasswordRule::ALL
        .iter()
        .map(|rule| RequirementStatus {
            rule: *rule,
            satisfied: rule.is_satisfied_by(password),
        })
        .collect()
}

pub fn all_requirements_met(password: &str) -> bool {
    PasswordRule::ALL.iter().all(|rule| rule.is_satisfied_by(password))
}

/// Reject the submission if any named field is blank
///
/// Reports the first blank field in the order given.
pub fn required_fields_present(fields: &[(&str, &str)]) -> Result<(), ClientError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ClientError::validation(*name, REQUIRED_MESSAGE)),
        None => Ok(()),
    }
}

/// Comma separated ingredients, trimmed, blanks dropped
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Period separated instruction steps, trimmed, blanks dropped
pub fn instruction_steps(raw: &str) -> Vec<String> {
    raw.split('.')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

/// Human readable form of an `HH:MM` duration, e.g. "1 hour 30 minutes"
pub fn format_duration(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return "N/A".to_string();
    };
    let (Ok(hours), Ok(minutes)) = (hours.trim().parse::<u32>(), minutes.trim().parse::<u32>())
    else {
        return "N/A".to_string();
    };

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours > 1 { "s" } else { "" }));
    }
    if minutes > 0 {
        parts.push(format!("{} minute{}", minutes, if minutes > 1 { "s" } else { "" }));
    }
    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}
