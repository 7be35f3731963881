//! Named identifiers.
//!
//! Parameters, tuples and dimensions are named by [`Id`]s. An identifier
//! may carry an opaque user tag; two identifiers are equal only if both the
//! name and the tag agree.

use std::fmt;
use std::sync::Arc;

/// A named identifier with an optional user tag.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id {
    name: Arc<str>,
    user: Option<u64>,
}

impl Id {
    /// Creates an identifier without a user tag.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            user: None,
        }
    }

    /// Creates an identifier carrying a user tag.
    #[must_use]
    pub fn with_user(name: &str, user: u64) -> Self {
        Self {
            name: Arc::from(name),
            user: Some(user),
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user tag, if any.
    #[must_use]
    pub fn user(&self) -> Option<u64> {
        self.user
    }

    /// Returns the same identifier with the user tag removed.
    #[must_use]
    pub fn reset_user(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            user: None,
        }
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.user {
            Some(user) => write!(f, "Id({}@{user})", self.name),
            None => write!(f, "Id({})", self.name),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality_includes_user() {
        let plain = Id::new("N");
        let tagged = Id::with_user("N", 7);

        assert_ne!(plain, tagged);
        assert_eq!(plain, tagged.reset_user());
        assert_eq!(tagged.user(), Some(7));
        assert_eq!(tagged.name(), "N");
    }
}
