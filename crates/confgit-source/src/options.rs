use std::time::Duration;

use confgit_remote::{AuthMethod, RefSpec};

/// Default environment when the caller selects none.
pub const DEFAULT_ENVIRONMENT: &str = "master";
/// Default suffix appended to a namespace to form a filename.
pub const DEFAULT_FILE_EXTENSION: &str = "jsonnet";
/// Default window during which reference data is served without remote
/// contact.
pub const DEFAULT_FETCH_TTL: Duration = Duration::from_secs(10);
/// Default per-attempt fetch deadline (extended on the very first fetch).
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Construction-time configuration for a [`ConfigSource`].
///
/// [`ConfigSource`]: crate::source::ConfigSource
#[derive(Clone, Debug)]
pub struct SourceOptions {
    /// Initially selected environment (branch name).
    pub environment: String,
    /// Credential passed through to the remote on every fetch.
    pub auth: AuthMethod,
    /// Suffix mapping namespaces to filenames (`"default"` → `"default.jsonnet"`).
    pub file_extension: String,
    /// How long reference data stays fresh before the next fetch.
    pub fetch_ttl: Duration,
    /// Per-attempt fetch deadline.
    pub fetch_timeout: Duration,
    /// Which remote references to track.
    pub refspec: RefSpec,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.into(),
            auth: AuthMethod::Anonymous,
            file_extension: DEFAULT_FILE_EXTENSION.into(),
            fetch_ttl: DEFAULT_FETCH_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            refspec: RefSpec::all_branches(),
        }
    }
}

impl SourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    pub fn with_fetch_ttl(mut self, ttl: Duration) -> Self {
        self.fetch_ttl = ttl;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_refspec(mut self, refspec: RefSpec) -> Self {
        self.refspec = refspec;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = SourceOptions::default();
        assert_eq!(opts.environment, "master");
        assert_eq!(opts.file_extension, "jsonnet");
        assert_eq!(opts.fetch_ttl, Duration::from_secs(10));
        assert_eq!(opts.fetch_timeout, Duration::from_secs(2));
        assert!(!opts.auth.is_authenticated());
    }

    #[test]
    fn builder_chain() {
        let opts = SourceOptions::new()
            .with_environment("test")
            .with_file_extension("libsonnet")
            .with_fetch_ttl(Duration::from_secs(30))
            .with_fetch_timeout(Duration::from_secs(5));
        assert_eq!(opts.environment, "test");
        assert_eq!(opts.file_extension, "libsonnet");
        assert_eq!(opts.fetch_ttl, Duration::from_secs(30));
        assert_eq!(opts.fetch_timeout, Duration::from_secs(5));
    }
}
