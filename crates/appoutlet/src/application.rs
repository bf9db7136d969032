use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for an application.
/// Carries the upstream catalog id unchanged (e.g. a Flatpak app id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The catalog an application was synchronized from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStore {
    Flathub,
    Other(String),
}

impl fmt::Display for ApplicationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flathub => write!(f, "FLATHUB"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl ApplicationStore {
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "FLATHUB" => Self::Flathub,
            _ => Self::Other(s.to_owned()),
        }
    }
}

/// How an application is packaged for installation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageType {
    Flatpak,
    Other(String),
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flatpak => write!(f, "FLATPAK"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl PackageType {
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "FLATPAK" => Self::Flatpak,
            _ => Self::Other(s.to_owned()),
        }
    }
}

/// An application as stored locally, regardless of which catalog it came from.
///
/// Values are treated as immutable: updates build a new value with the
/// changed field rather than mutating a shared record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub developer: Option<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub bugtracker_url: Option<String>,
    pub donation_url: Option<String>,
    pub icon: Option<String>,
    pub download_url: Option<String>,
    pub version: Option<String>,
    pub last_release_date: Option<String>,
    pub creation_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    pub store: ApplicationStore,
    pub package_type: PackageType,
    /// `None` means the application has never been viewed.
    pub view_count: Option<u64>,
}

impl Application {
    /// A record with only the identifying fields set.
    pub fn new(id: ApplicationId, store: ApplicationStore, package_type: PackageType) -> Self {
        Self {
            id,
            name: None,
            summary: None,
            description: None,
            developer: None,
            license: None,
            homepage: None,
            bugtracker_url: None,
            donation_url: None,
            icon: None,
            download_url: None,
            version: None,
            last_release_date: None,
            creation_date: None,
            tags: Vec::new(),
            screenshots: Vec::new(),
            store,
            package_type,
            view_count: None,
        }
    }

    /// Number of recorded views, with an absent counter read as zero.
    pub fn views(&self) -> u64 {
        self.view_count.unwrap_or(0)
    }

    pub fn with_incremented_view_count(self) -> Self {
        Self {
            view_count: Some(self.views().saturating_add(1)),
            ..self
        }
    }

    pub fn with_view_count(self, view_count: Option<u64>) -> Self {
        Self { view_count, ..self }
    }
}
