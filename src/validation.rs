//! Input validation for note payloads, ids and query parameters.
//!
//! Payloads are checked as raw JSON so that a wrongly-typed field is
//! reported the same way as an out-of-range one. Every problem found in a
//! payload is collected into [`ValidationErrors`]; nothing is applied when
//! any check fails.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{NotesError, Result};
use crate::model::{NewNote, NotePatch};

/// Maximum allowed length for a note title, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for a note body, in characters.
pub const MAX_BODY_LENGTH: usize = 10_000;

/// Maximum allowed length for a single tag, in characters.
pub const MAX_TAG_LENGTH: usize = 50;

/// Maximum number of tags on one note.
pub const MAX_TAGS: usize = 20;

pub const INVALID_ID_MESSAGE: &str = "Note id must be a valid UUID";

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("tag pattern is valid"));

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern is valid")
});

/// One failed constraint, addressed by a dotted path into the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(path, message);
        errors
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether some error is reported at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path == path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| {
                if e.path.is_empty() {
                    e.message.clone()
                } else {
                    format!("{}: {}", e.path, e.message)
                }
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Validates a note title. Returns the failure message on error.
pub fn validate_title(title: &str) -> std::result::Result<(), String> {
    if title.is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        ));
    }
    Ok(())
}

/// Validates a note body.
pub fn validate_body(body: &str) -> std::result::Result<(), String> {
    if body.is_empty() {
        return Err("Body must not be empty".to_string());
    }
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err("Body must be at most 10 000 characters".to_string());
    }
    Ok(())
}

/// Validates a tag name.
pub fn validate_tag(tag: &str) -> std::result::Result<(), String> {
    if tag.is_empty() {
        return Err("Tag must not be empty".to_string());
    }
    if tag.chars().count() > MAX_TAG_LENGTH {
        return Err(format!("Tag must be at most {} characters", MAX_TAG_LENGTH));
    }
    if !TAG_PATTERN.is_match(tag) {
        return Err(
            "Tag may only contain letters, digits, hyphens and underscores".to_string(),
        );
    }
    Ok(())
}

/// Parses a `POST /notes` payload.
pub fn parse_new_note(payload: &Value) -> Result<NewNote> {
    let obj = expect_object(payload)?;
    let mut errors = ValidationErrors::default();

    let title = string_field(obj, "title", true, validate_title, &mut errors);
    let body = string_field(obj, "body", true, validate_body, &mut errors);
    let tags = tags_field(obj, &mut errors);

    match (title, body) {
        (Some(title), Some(body)) if errors.is_empty() => Ok(NewNote {
            title,
            body,
            tags: tags.unwrap_or_default(),
        }),
        _ => Err(errors.into()),
    }
}

/// Parses a `PATCH /notes/{id}` payload. Unknown keys are ignored, but at
/// least one of `title`, `body` or `tags` must be present.
pub fn parse_note_patch(payload: &Value) -> Result<NotePatch> {
    let obj = expect_object(payload)?;
    let mut errors = ValidationErrors::default();

    let patch = NotePatch {
        title: string_field(obj, "title", false, validate_title, &mut errors),
        body: string_field(obj, "body", false, validate_body, &mut errors),
        tags: tags_field(obj, &mut errors),
        updated_at: None,
    };

    if !errors.is_empty() {
        return Err(errors.into());
    }
    if patch.is_empty() {
        return Err(ValidationErrors::single(
            "",
            "At least one field must be provided for update",
        )
        .into());
    }
    Ok(patch)
}

/// Parses a note id path segment. Only the hyphenated form is accepted.
pub fn parse_note_id(raw: &str) -> Result<Uuid> {
    if UUID_PATTERN.is_match(raw) {
        if let Ok(id) = Uuid::parse_str(raw) {
            return Ok(id);
        }
    }
    Err(ValidationErrors::single("id", INVALID_ID_MESSAGE).into())
}

/// Validates the `tag` query parameter.
pub fn parse_tag_query(tag: Option<&str>, required: bool) -> Result<Option<String>> {
    match tag {
        None if required => Err(ValidationErrors::single("tag", "Required").into()),
        None => Ok(None),
        Some(tag) => match validate_tag(tag) {
            Ok(()) => Ok(Some(tag.to_string())),
            Err(message) => Err(ValidationErrors::single("tag", message).into()),
        },
    }
}

fn expect_object(payload: &Value) -> Result<&Map<String, Value>> {
    payload.as_object().ok_or_else(|| {
        NotesError::Validation(ValidationErrors::single(
            "",
            type_mismatch("object", payload),
        ))
    })
}

fn string_field(
    obj: &Map<String, Value>,
    key: &str,
    required: bool,
    check: fn(&str) -> std::result::Result<(), String>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match obj.get(key) {
        None => {
            if required {
                errors.push(key, "Required");
            }
            None
        }
        Some(Value::String(value)) => match check(value) {
            Ok(()) => Some(value.clone()),
            Err(message) => {
                errors.push(key, message);
                None
            }
        },
        Some(other) => {
            errors.push(key, type_mismatch("string", other));
            None
        }
    }
}

fn tags_field(obj: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    let items = match obj.get("tags") {
        None => return None,
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push("tags", type_mismatch("array", other));
            return None;
        }
    };

    if items.len() > MAX_TAGS {
        errors.push("tags", format!("A note may have at most {} tags", MAX_TAGS));
    }

    let mut tags = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let path = format!("tags.{}", index);
        match item {
            Value::String(tag) => match validate_tag(tag) {
                Ok(()) => tags.push(tag.clone()),
                Err(message) => errors.push(path, message),
            },
            other => errors.push(path, type_mismatch("string", other)),
        }
    }
    Some(tags)
}

fn type_mismatch(expected: &str, found: &Value) -> String {
    format!("Expected {}, received {}", expected, json_type(found))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
