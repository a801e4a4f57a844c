//! Name validation for lists and items.
//!
//! # Responsibility
//! - Provide the pure uniqueness/length checks that run before every
//!   create/rename mutation.
//!
//! # Invariants
//! - Uniqueness is checked before length, so a duplicate long name reports
//!   `NotUnique`.
//! - On any error the caller skips the mutation entirely; no partial
//!   writes occur.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MIN_CHARS: usize = 1;
pub const NAME_MAX_CHARS: usize = 100;

/// Why a candidate name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// The name collides with an existing one in the same scope.
    NotUnique,
    /// The name is outside the 1..=100 character range.
    BadLength,
}

impl Display for NameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotUnique => write!(f, "name must be unique"),
            Self::BadLength => write!(
                f,
                "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters long"
            ),
        }
    }
}

impl Error for NameError {}

/// Validates a candidate name against the names already present in its
/// scope (all list names, or one list's item names).
pub fn validate_name<'a, I>(candidate: &str, existing: I) -> Result<(), NameError>
where
    I: IntoIterator<Item = &'a str>,
{
    if existing.into_iter().any(|name| name == candidate) {
        return Err(NameError::NotUnique);
    }

    let chars = candidate.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(NameError::BadLength);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_name, NameError, NAME_MAX_CHARS};

    #[test]
    fn accepts_fresh_name_within_bounds() {
        assert_eq!(validate_name("groceries", ["errands"]), Ok(()));
        assert_eq!(validate_name("a", []), Ok(()));
        let max = "x".repeat(NAME_MAX_CHARS);
        assert_eq!(validate_name(&max, []), Ok(()));
    }

    #[test]
    fn rejects_duplicate_name() {
        assert_eq!(
            validate_name("groceries", ["groceries"]),
            Err(NameError::NotUnique)
        );
    }

    #[test]
    fn rejects_empty_and_oversized_names() {
        assert_eq!(validate_name("", []), Err(NameError::BadLength));
        let too_long = "x".repeat(NAME_MAX_CHARS + 1);
        assert_eq!(validate_name(&too_long, []), Err(NameError::BadLength));
    }

    #[test]
    fn duplicate_wins_over_length() {
        let long = "x".repeat(NAME_MAX_CHARS + 1);
        assert_eq!(
            validate_name(&long, [long.as_str()]),
            Err(NameError::NotUnique)
        );
    }

    #[test]
    fn length_counts_unicode_scalars_not_bytes() {
        let name = "\u{00e9}".repeat(NAME_MAX_CHARS);
        assert_eq!(validate_name(&name, []), Ok(()));
    }
}
