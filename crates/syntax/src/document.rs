use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Opaque key scoping all per-file state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(Url);

impl DocumentId {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn parse(uri: &str) -> Result<Self, url::ParseError> {
        Url::parse(uri).map(Self)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Url> for DocumentId {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
