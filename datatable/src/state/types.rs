//! Small value types held by the table state.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Maps an "ascending?" flag to a direction.
    pub fn from_asc(asc: bool) -> Self {
        if asc { Self::Asc } else { Self::Desc }
    }

    /// Returns `true` for [`SortDirection::Asc`].
    pub fn is_asc(self) -> bool {
        self == Self::Asc
    }

    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Opaque token used to signal "clear the selection" from outside the table.
///
/// The table remembers the last token it saw. Handing it a different token
/// clears the selection once; handing it the same token again does nothing.
///
/// # Example
///
/// ```
/// use datatable::state::ClearToken;
///
/// let first = ClearToken::default();
/// let second = first.next();
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClearToken(u64);

impl ClearToken {
    /// Creates a token with an explicit generation.
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Returns a token that differs from this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the token generation.
    pub fn generation(self) -> u64 {
        self.0
    }
}
