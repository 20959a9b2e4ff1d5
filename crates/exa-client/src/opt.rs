//! Explicitly optional wire fields
//!
//! The Exa API treats an omitted field differently from one set to a zero
//! value, so neither `Option<T>` defaults nor zero-value checks are enough on
//! their own. [`OptField`] keeps the two states apart:
//!
//! - on requests, an unset field is skipped when serializing;
//! - on responses, an absent field (or a JSON `null`) decodes to unset.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that is either unset or set to a value
#[derive(Debug, Clone, PartialEq)]
pub enum OptField<T> {
    /// Not set; omitted from the payload
    Unset,
    /// Explicitly set, possibly to a zero value
    Set(T),
}

impl<T> Default for OptField<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> OptField<T> {
    /// Set the field to a value
    pub fn set_to(&mut self, value: T) {
        *self = Self::Set(value);
    }

    /// Clear the field
    pub fn reset(&mut self) {
        *self = Self::Unset;
    }

    /// Whether the field is set
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Whether the field is unset
    ///
    /// Used as the `skip_serializing_if` predicate on request structs.
    pub fn is_unset(&self) -> bool {
        !self.is_set()
    }

    /// Borrow the value if set
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// Convert into an `Option`
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// The value if set, otherwise the type's zero value
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.into_option().unwrap_or_default()
    }
}

impl<T: Presence> OptField<T> {
    /// Set only when a caller supplied a meaningful value
    ///
    /// `None`, zero counts, empty strings, empty lists and `false` all leave
    /// the field unset.
    pub fn from_present(value: Option<T>) -> Self {
        match value {
            Some(v) if v.is_present() => Self::Set(v),
            _ => Self::Unset,
        }
    }
}

impl<T> From<Option<T>> for OptField<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Unset,
        }
    }
}

impl<T: Serialize> Serialize for OptField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}

/// Decide whether a caller-supplied argument counts as present
pub trait Presence {
    /// `false` for the type's "nothing supplied" value
    fn is_present(&self) -> bool;
}

impl Presence for u32 {
    fn is_present(&self) -> bool {
        *self > 0
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Deserialize `null` as the type's default
///
/// For plain list fields such as highlights, which are never optional on the
/// caller side.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
