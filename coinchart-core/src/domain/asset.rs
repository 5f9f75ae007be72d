use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-normalized identifier of a tradable asset (e.g. `bitcoin`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Normalize user or provider text into an id: surrounding whitespace is
    /// dropped and the token is lowercased.
    ///
    /// # Errors
    /// `DataValidation` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(DashboardError::validation("asset id cannot be empty"));
        }
        Ok(Self(token.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form with the first letter capitalized (`bitcoin` -> `Bitcoin`).
    pub fn display_name(&self) -> String {
        capitalize(&self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AssetId {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Ordered list of the assets a provider currently supports.
///
/// Built fresh on every catalog fetch and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetCatalog {
    ids: Vec<AssetId>,
}

impl AssetCatalog {
    pub fn new(ids: Vec<AssetId>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[AssetId] {
        &self.ids
    }
}

impl<'a> IntoIterator for &'a AssetCatalog {
    type Item = &'a AssetId;
    type IntoIter = std::slice::Iter<'a, AssetId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl FromIterator<AssetId> for AssetCatalog {
    fn from_iter<I: IntoIterator<Item = AssetId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
