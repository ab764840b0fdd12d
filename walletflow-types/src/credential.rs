use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// API credential supplied by the caller. Never printed by `Debug`.
///
/// Deserialization applies the same rule as [`Credential::new`]: a blank key is
/// rejected, and [`Credential::deserialize_optional`] maps it to `None`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key; blank input yields `None`.
    #[must_use]
    pub fn new(key: impl AsRef<str>) -> Option<Self> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            None
        } else {
            Some(Self(key.to_string()))
        }
    }

    /// The raw key, for attaching to a request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `deserialize_with` helper for optional keys: absent, `null`, and blank all
    /// become `None`.
    ///
    /// # Errors
    /// Propagates the deserializer's error for non-string input.
    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(Self::new))
    }
}

impl Serialize for Credential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Credential {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).ok_or_else(|| serde::de::Error::custom("credential must not be blank"))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
