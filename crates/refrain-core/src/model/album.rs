use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Value of the album filter: every album, or one album by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AlbumFilter {
    #[default]
    All,
    Album(String),
}

impl AlbumFilter {
    /// The literal that selects every album.
    pub const ALL: &'static str = "all";

    #[must_use]
    pub fn album(name: impl Into<String>) -> Self {
        Self::Album(name.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Case-sensitive, exact comparison against a record's album.
    pub fn matches(&self, album: &str) -> bool {
        match self {
            Self::All => true,
            Self::Album(name) => name == album,
        }
    }

    /// Filter options in display order: `all`, then the known albums.
    pub fn options(known: &[String]) -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(known.iter().cloned().map(Self::Album))
            .collect()
    }

    /// The option after this one, wrapping back to `all`.
    ///
    /// A filter that is not among the known albums moves to `all`.
    #[must_use]
    pub fn next(&self, known: &[String]) -> Self {
        let options = Self::options(known);
        match options.iter().position(|o| o == self) {
            Some(i) => options[(i + 1) % options.len()].clone(),
            None => Self::All,
        }
    }

    /// The option before this one, wrapping to the last known album.
    #[must_use]
    pub fn previous(&self, known: &[String]) -> Self {
        let options = Self::options(known);
        match options.iter().position(|o| o == self) {
            Some(i) => options[(i + options.len() - 1) % options.len()].clone(),
            None => Self::All,
        }
    }
}

impl fmt::Display for AlbumFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Album(name) => f.write_str(name),
        }
    }
}

impl FromStr for AlbumFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(Error::InvalidAlbum(s.to_string()));
        }
        if s == Self::ALL {
            return Ok(Self::All);
        }
        Ok(Self::Album(s.to_string()))
    }
}

impl TryFrom<String> for AlbumFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AlbumFilter> for String {
    fn from(filter: AlbumFilter) -> Self {
        filter.to_string()
    }
}
