//! Dashboard roles.
//!
//! The role vocabulary is closed: every authenticated user resolves to
//! exactly one of the four variants below. Role assignments live in an
//! external table keyed by user id; anything that table returns outside
//! the vocabulary is narrowed to the baseline [`User`](Role::User) role
//! rather than rejected, so a corrupt assignment row can never lock a
//! student out of the dashboard.

use std::fmt;

/// Access level of an authenticated dashboard user.
///
/// Serialises as a lowercase snake_case string. Deserialisation is strict:
/// unknown role strings are an error, which makes any credential carrying a
/// role outside the vocabulary fail verification instead of being coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full access, including debug surfaces.
    Developer,
    /// Program-office staff: cohort-wide attendance management.
    ProgramOffice,
    /// Enrolled student: own attendance only.
    Student,
    /// Baseline authenticated user with no elevated assignment.
    User,
}

impl Role {
    /// Canonical string representation (matches the serde serialisation).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Developer => "developer",
            Self::ProgramOffice => "program_office",
            Self::Student => "student",
            Self::User => "user",
        }
    }

    /// Strict parse: only the four canonical strings are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "developer" => Some(Self::Developer),
            "program_office" => Some(Self::ProgramOffice),
            "student" => Some(Self::Student),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// Narrow an externally stored role assignment into the vocabulary.
    ///
    /// Elevated assignments map to their variant; everything else, including
    /// an explicit `"user"` row, empty strings, and unknown values, resolves
    /// to the baseline [`User`](Role::User) role.
    pub fn from_assignment(s: &str) -> Self {
        match s {
            "developer" => Self::Developer,
            "program_office" => Self::ProgramOffice,
            "student" => Self::Student,
            _ => Self::User,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Role::parse(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(
                &s,
                &["developer", "program_office", "student", "user"],
            )
        })
    }
}
