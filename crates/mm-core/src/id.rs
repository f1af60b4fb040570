//! Topic identifiers.
//!
//! Ids are interned once in a process-wide `ThreadedRodeo` and passed
//! around as 4-byte keys, so the layout engine can hash and compare them
//! freely. Topics written without an `@id` get a generated one with the
//! `_topic` prefix.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);
static GENERATED: AtomicU64 = AtomicU64::new(0);

const ANONYMOUS_PREFIX: &str = "_topic";

/// Interned `@id` of a topic.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicId(Spur);

impl TopicId {
    /// Intern `name`, reusing the existing key when it was seen before.
    pub fn intern(name: &str) -> Self {
        Self(INTERNER.get_or_intern(name))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Fresh id for a topic written without an explicit `@id`.
    pub fn anonymous() -> Self {
        Self::with_prefix(ANONYMOUS_PREFIX)
    }

    /// Fresh id `{prefix}_{n}`, unique for the life of the process.
    pub fn with_prefix(prefix: &str) -> Self {
        let n = GENERATED.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// Whether this id was generated by [`TopicId::anonymous`].
    pub fn is_anonymous(&self) -> bool {
        self.as_str()
            .strip_prefix(ANONYMOUS_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl From<&str> for TopicId {
    fn from(name: &str) -> Self {
        Self::intern(name)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for TopicId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TopicId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::intern(&name))
    }
}
