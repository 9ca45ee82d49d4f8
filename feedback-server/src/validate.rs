//! Validation layer: pure functions from raw submitted fields to either a
//! validated record or field-level errors. Never touches the store.

use feedback_storage::NewFeedback;
use serde::Deserialize;

pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// Raw field values as submitted by the browser. Every field defaults to
/// empty so a missing field becomes a validation error, not a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmittedFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Field-level error messages, in form field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validates a candidate submission.
///
/// All fields are trimmed then required; `email` must look like an email
/// address; `rating` must be an integer in 1..=5. Reports every failing
/// field. No field is auto-corrected.
pub fn validate(fields: &SubmittedFields) -> Result<NewFeedback, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = fields.name.trim();
    if name.is_empty() {
        errors.push("name", "name is required");
    }

    let email = fields.email.trim();
    if email.is_empty() {
        errors.push("email", "email is required");
    } else if !is_valid_email(email) {
        errors.push("email", "enter a valid email address");
    }

    let message = fields.message.trim();
    if message.is_empty() {
        errors.push("message", "message is required");
    }

    let rating = match fields.rating.trim().parse::<i64>() {
        Ok(r) if (RATING_MIN..=RATING_MAX).contains(&r) => Some(r),
        Ok(_) | Err(_) => {
            errors.push(
                "rating",
                format!("rating must be between {} and {}", RATING_MIN, RATING_MAX),
            );
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewFeedback {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        // Errors are empty, so rating parsed and is in range.
        rating: rating.unwrap_or(RATING_MIN),
    })
}

/// Minimal email syntax check: one `@`, nonempty local part, dotted
/// nonempty domain, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && !tld.is_empty()
}
