use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format for a rendered configuration document.
///
/// Only JSON rendering is implemented today; `Yaml` and `Toml` are named
/// extension points and rejected with `UnsupportedFormat` by the renderer.
/// `Unknown` is what unrecognized format strings parse to and is always
/// rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Unknown,
    #[default]
    Json,
    Yaml,
    Toml,
}

impl ContentType {
    /// Canonical lowercase name, matching what `FromStr` accepts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Unknown => "unknown",
            ContentType::Json => "json",
            ContentType::Yaml => "yaml",
            ContentType::Toml => "toml",
        }
    }

    /// Parse a format name. Unrecognized names map to
    /// [`ContentType::Unknown`], which renderers reject uniformly.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => ContentType::Json,
            "yaml" | "yml" => ContentType::Yaml,
            "toml" => ContentType::Toml,
            _ => ContentType::Unknown,
        }
    }

    /// MIME type used for HTTP responses carrying this format.
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Yaml => "application/yaml",
            ContentType::Toml => "application/toml",
            ContentType::Unknown => "application/octet-stream",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
