//! Input validation shared by the storage and HTTP layers.

use crate::error::{Error, Result};
use crate::traits::{CreateTodoRequest, NoteInput, UpdateTodoRequest};

/// Maximum tag name length in characters.
pub const TAG_NAME_MAX_CHARS: usize = 100;

/// Returns the value if it contains anything other than whitespace.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate a tag name and return it trimmed.
///
/// Any characters are allowed, including `:` and `,`.
pub fn validate_tag_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Tag name required".to_string()));
    }
    if trimmed.chars().count() > TAG_NAME_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Tag name must be {} characters or less",
            TAG_NAME_MAX_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

/// Collapse duplicate tag ids, keeping first-seen order.
pub fn dedup_tag_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

impl NoteInput {
    /// Title and content must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Title, content, and date required".to_string(),
            ));
        }
        Ok(())
    }
}

impl CreateTodoRequest {
    /// Text must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::InvalidInput("Note ID and text required".to_string()));
        }
        Ok(())
    }
}

impl UpdateTodoRequest {
    /// Text must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::InvalidInput("Todo text required".to_string()));
        }
        Ok(())
    }
}
