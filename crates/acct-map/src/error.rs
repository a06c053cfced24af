//! Error types for field selection.

use std::fmt;

use acct_model::{RoleKind, SingletonRole};

/// Rejected selection or assignment. The message doubles as the validation
/// text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Field is not a column of the imported table.
    UnknownField(String),
    /// Field already holds the other singleton role.
    FieldAlreadyBound { field: String, role: SingletonRole },
    /// A suggestion is awaiting accept or reject.
    SuggestionPending,
    /// Accept or reject was called with no suggestion on offer.
    NoPendingSuggestion,
    /// Role cannot be used as a bucket.
    NotABucket(RoleKind),
    /// Bucket only holds one field and it is taken.
    BucketFull { bucket: RoleKind, field: String },
    /// Field is already assigned to a bucket.
    FieldAlreadyAssigned { field: String, bucket: RoleKind },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(field) => write!(f, "Column not found: {field}"),
            Self::FieldAlreadyBound { field, role } => write!(
                f,
                "Column '{field}' is already selected as the {role}; choose a different column"
            ),
            Self::SuggestionPending => {
                write!(f, "Accept or reject the suggested columns first")
            }
            Self::NoPendingSuggestion => write!(f, "No column suggestion is pending"),
            Self::NotABucket(role) => write!(f, "{role} is not a field category"),
            Self::BucketFull { bucket, field } => {
                write!(f, "{bucket} already holds '{field}'")
            }
            Self::FieldAlreadyAssigned { field, bucket } => {
                write!(f, "Column '{field}' is already assigned to {bucket}")
            }
        }
    }
}

impl std::error::Error for SelectionError {}
