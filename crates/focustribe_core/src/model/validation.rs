//! Validation failures raised before any state is mutated.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was missing or blank.
    MissingField(&'static str),
    /// A patch asked for `status` and `completed` values that disagree.
    ConflictingCompletion,
    /// Tribes always keep at least their creator.
    MemberCountBelowMinimum(u32),
    /// Email does not look like an address.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
            Self::ConflictingCompletion => {
                write!(f, "`status` and `completed` disagree on completion state")
            }
            Self::MemberCountBelowMinimum(value) => {
                write!(f, "member count must be at least 1, got {value}")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for ValidationError {}
