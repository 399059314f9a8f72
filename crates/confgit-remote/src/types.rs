use serde::{Deserialize, Serialize};

/// Wildcard pattern selecting which remote references a fetch observes.
///
/// The default spec tracks every branch head, mirroring a
/// `refs/heads/*:refs/heads/*` fetch configuration. Only a single trailing
/// `*` is supported; anything else matches literally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefSpec(String);

impl RefSpec {
    /// Spec matching all branch heads.
    pub fn all_branches() -> Self {
        Self("refs/heads/*".into())
    }

    /// A custom pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a fully-qualified reference name falls under this spec.
    pub fn matches(&self, name: &str) -> bool {
        match self.0.strip_suffix('*') {
            Some(prefix) => name.starts_with(prefix),
            None => name == self.0,
        }
    }
}

impl Default for RefSpec {
    fn default() -> Self {
        Self::all_branches()
    }
}

/// Result of a reference fetch.
///
/// A remote with nothing new is a success, not an error: the reference data
/// observed by the previous fetch is still current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New reference data was observed.
    Updated,
    /// The remote had nothing newer than what was already tracked.
    UpToDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_branches_matches_heads() {
        let spec = RefSpec::all_branches();
        assert!(spec.matches("refs/heads/master"));
        assert!(spec.matches("refs/heads/feature/deep"));
        assert!(!spec.matches("refs/tags/v1"));
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        let spec = RefSpec::new("refs/heads/master");
        assert!(spec.matches("refs/heads/master"));
        assert!(!spec.matches("refs/heads/master2"));
    }

    #[test]
    fn default_is_all_branches() {
        assert_eq!(RefSpec::default(), RefSpec::all_branches());
    }
}
