use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Skin-tone identifier attached to products and user profiles.
///
/// Tones are intentionally opaque strings at this layer; the set of valid
/// tones is owned by the personalization questionnaire, which is external
/// to this core. Matching is exact (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToneTag(Cow<'static, str>);

impl ToneTag {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ToneTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToneTag {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<&'static str> for ToneTag {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}
