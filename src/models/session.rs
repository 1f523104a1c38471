use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A participant attributed to a section of a crawled session
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Speaker {
    /// Display name; speakers are identified by exact equality on this field
    pub full_name: String,
    /// Link to the member profile page, absent or empty for guests
    #[serde(default)]
    pub profile_url: Option<String>,
    /// Any other attributes the crawler recorded, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Speaker {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            profile_url: None,
            extra: Map::new(),
        }
    }

    pub fn with_profile(full_name: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            profile_url: Some(profile_url.into()),
            extra: Map::new(),
        }
    }

    /// True when the speaker carries a non-empty profile URL
    pub fn has_profile(&self) -> bool {
        self.profile_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// One speech turn within a session
///
/// Missing keys are read as `null`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Section {
    #[serde(default)]
    pub speaker: Option<Speaker>,
    #[serde(default)]
    pub contents: Option<String>,
}

impl Section {
    /// Whether anything was said in this section
    pub fn has_contents(&self) -> bool {
        self.contents.as_deref().is_some_and(|c| !c.is_empty())
    }
}
