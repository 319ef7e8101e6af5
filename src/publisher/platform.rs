//! Platform identifiers and operator platform selection

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A social platform the agent can publish to
///
/// The declaration order is the dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    LinkedIn,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::LinkedIn,
    ];

    /// Lowercase identifier used at the prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
        }
    }

    /// Whether the platform can publish at a future time on its own
    pub fn supports_native_scheduling(&self) -> bool {
        matches!(self, Self::Facebook | Self::Instagram)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
        };
        f.write_str(name)
    }
}

/// Invalid platform selection entered by the operator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no platform selected")]
    Empty,

    #[error("unknown platform '{0}' (expected facebook, instagram, twitter, linkedin or all)")]
    Unknown(String),
}

impl FromStr for Platform {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or(SelectionError::Unknown(name))
    }
}

/// The set of platforms selected for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSet(BTreeSet<Platform>);

impl PlatformSet {
    pub fn all() -> Self {
        Self(Platform::ALL.into_iter().collect())
    }

    /// Parses a selection such as `facebook, instagram` or `all`
    ///
    /// Names are case-insensitive and separated by commas or whitespace.
    /// Duplicates collapse; `all` anywhere in the list selects every platform.
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let names: Vec<String> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        if names.is_empty() {
            return Err(SelectionError::Empty);
        }

        if names.iter().any(|n| n == "all") {
            return Ok(Self::all());
        }

        names
            .iter()
            .map(|n| n.parse::<Platform>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains(&platform)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Platforms in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<I: IntoIterator<Item = Platform>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for PlatformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|p| p.to_string()).collect();
        f.write_str(&names.join(", "))
    }
}
