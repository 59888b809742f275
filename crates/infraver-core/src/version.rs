//! Semantic version arithmetic over `v<major>.<minor>.<patch>` tags.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Tag reported when the repository has no `v*` tag yet.
pub const INITIAL_TAG: &str = "v0.0.0";

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v(\d+)\.(\d+)\.(\d+)").expect("Invalid regex"));

/// Which version component advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Increment {
    Patch,
    Minor,
    Major,
}

impl Increment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Increment::Patch => "patch",
            Increment::Minor => "minor",
            Increment::Major => "major",
        }
    }
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The baseline a change set is computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tag", rename_all = "snake_case")]
pub enum ReferenceTag {
    /// Latest tag matching `v*`
    Tagged(String),
    /// No tag exists; reported as [`INITIAL_TAG`]
    Initial,
}

impl ReferenceTag {
    pub fn from_latest(latest: Option<String>) -> Self {
        match latest {
            Some(tag) => ReferenceTag::Tagged(tag),
            None => ReferenceTag::Initial,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReferenceTag::Tagged(tag) => tag,
            ReferenceTag::Initial => INITIAL_TAG,
        }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, ReferenceTag::Initial)
    }
}

impl fmt::Display for ReferenceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Read the leading `v<major>.<minor>.<patch>` of a tag.
    ///
    /// Anything after the patch number is ignored. A tag that does not
    /// match, or whose components overflow, reads as `0.0.0`.
    ///
    /// ```
    /// use infraver_core::SemanticVersion;
    ///
    /// assert_eq!(SemanticVersion::from_tag("v1.2.3-rc1"), SemanticVersion::new(1, 2, 3));
    /// assert_eq!(SemanticVersion::from_tag("foo"), SemanticVersion::new(0, 0, 0));
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        TAG_PATTERN
            .captures(tag)
            .and_then(|caps| {
                Some(Self::new(
                    caps[1].parse().ok()?,
                    caps[2].parse().ok()?,
                    caps[3].parse().ok()?,
                ))
            })
            .unwrap_or_default()
    }

    /// Apply an increment; higher components reset the lower ones.
    pub fn bump(self, increment: Increment) -> Self {
        match increment {
            Increment::Major => Self::new(self.major.saturating_add(1), 0, 0),
            Increment::Minor => Self::new(self.major, self.minor.saturating_add(1), 0),
            Increment::Patch => Self::new(self.major, self.minor, self.patch.saturating_add(1)),
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// `v<major>.<minor>.<patch>-<fingerprint>`
pub fn compose_version(version: SemanticVersion, fingerprint: &str) -> String {
    format!("{}-{}", version, fingerprint)
}
