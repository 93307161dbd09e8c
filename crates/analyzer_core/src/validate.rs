use std::fmt;

use crate::file::{FileCandidate, SelectionSet};

/// Media types the backend accepts.
pub const ALLOWED_MEDIA_TYPES: [&str; 4] = [
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

/// Hard cap on a single file: 10 MiB.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Why a candidate batch was rejected. Rejection is always atomic: one
/// bad file fails the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    UnsupportedType { name: String, media_type: String },
    TooLarge { name: String, size_bytes: u64 },
}

impl SelectionError {
    /// User-facing blocking prompt for this rejection.
    pub fn prompt(&self) -> &'static str {
        match self {
            SelectionError::UnsupportedType { .. } => {
                "Only PDF, JPG, JPEG, PNG files are allowed."
            }
            SelectionError::TooLarge { .. } => "File size must be below 10MB.",
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::UnsupportedType { name, media_type } => {
                write!(f, "unsupported media type {media_type} for {name}")
            }
            SelectionError::TooLarge { name, size_bytes } => {
                write!(
                    f,
                    "{name} is {size_bytes} bytes (limit {MAX_FILE_BYTES})"
                )
            }
        }
    }
}

pub fn is_media_type_allowed(media_type: &str) -> bool {
    ALLOWED_MEDIA_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(media_type))
}

/// Validates a candidate batch against the acceptance policy.
///
/// All-or-nothing: either every file passes and the returned set
/// replaces the previous selection, or the first violation rejects the
/// whole batch and the caller's selection stands.
pub fn validate_selection(
    candidates: Vec<FileCandidate>,
) -> Result<SelectionSet, SelectionError> {
    for candidate in &candidates {
        if !is_media_type_allowed(&candidate.media_type) {
            return Err(SelectionError::UnsupportedType {
                name: candidate.name.clone(),
                media_type: candidate.media_type.clone(),
            });
        }
        if candidate.size_bytes > MAX_FILE_BYTES {
            return Err(SelectionError::TooLarge {
                name: candidate.name.clone(),
                size_bytes: candidate.size_bytes,
            });
        }
    }
    Ok(SelectionSet::from_validated(candidates))
}
