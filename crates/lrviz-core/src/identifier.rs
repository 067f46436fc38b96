//! Interned identifiers for item-set nodes and transition edges.
//!
//! Node and edge ids are compared on every reveal step (visible-set lookups,
//! pending-queue removal), so they are interned once and compared as symbols.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Identifier of an item-set node or a transition edge.
///
/// # Examples
///
/// ```
/// use lrviz_core::identifier::Id;
///
/// let state = Id::new("I0");
/// assert_eq!(state, "I0");
/// assert_eq!(state, Id::new("I0"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string form, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Builds the default id of a transition edge from its endpoints and symbol.
    ///
    /// ```
    /// use lrviz_core::identifier::Id;
    ///
    /// let edge = Id::for_transition(Id::new("I0"), "E", Id::new("I1"));
    /// assert_eq!(edge, "I0-E->I1");
    /// ```
    pub fn for_transition(source: Id, label: &str, target: Id) -> Self {
        let name = format!("{source}-{label}->{target}");
        Self::new(&name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(name)
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner
            .resolve(self.0)
            .is_some_and(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
