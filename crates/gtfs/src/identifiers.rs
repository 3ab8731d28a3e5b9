//! Type-safe, efficient identifiers for GTFS entities.
//!
//! An [`Identifier<E>`] is a raw key string tagged with the entity kind it
//! refers to, so a stop key cannot be passed where a trip key is expected.
//! All identifiers use `Arc<str>` for cheap cloning and minimal memory overhead.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// Key of an entity of kind `E`.
///
/// The type parameter only exists at compile time. Construction never fails:
/// whether a key is valid is decided by looking it up, not by its format.
pub struct Identifier<E> {
    raw: Arc<str>,
    kind: PhantomData<fn() -> E>,
}

impl<E> Identifier<E> {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self {
            raw: s.as_ref().into(),
            kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

// Manual impls so that none of these require bounds on `E`.

impl<E> Clone for Identifier<E> {
    fn clone(&self) -> Self {
        Self {
            raw: Arc::clone(&self.raw),
            kind: PhantomData,
        }
    }
}

impl<E> PartialEq for Identifier<E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.raw, &other.raw) || self.raw == other.raw
    }
}

impl<E> Eq for Identifier<E> {}

impl<E> PartialOrd for Identifier<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Identifier<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<E> Hash for Identifier<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<E> fmt::Debug for Identifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&&*self.raw).finish()
    }
}

impl<E> fmt::Display for Identifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<E> From<String> for Identifier<E> {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl<E> From<&str> for Identifier<E> {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<E> AsRef<str> for Identifier<E> {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

#[cfg(feature = "serde")]
impl<E> serde::Serialize for Identifier<E> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl<'de, E> serde::Deserialize<'de> for Identifier<E> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
