use std::fmt;

use serde::{Deserialize, Serialize};

/// Credential for connecting to a remote.
///
/// ConfGit passes this through to the transport verbatim; it never inspects
/// or stores credentials beyond handing them to [`fetch_references`].
///
/// [`fetch_references`]: crate::transport::ConfigRemote::fetch_references
#[derive(Clone, Serialize, Deserialize)]
pub enum AuthMethod {
    /// Username/password (or username/token) pair for HTTP basic auth.
    Basic { username: String, password: String },
    /// Bearer token.
    Bearer(String),
    /// No credential.
    Anonymous,
}

impl Default for AuthMethod {
    fn default() -> Self {
        Self::Anonymous
    }
}

impl AuthMethod {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Bearer(_) => "bearer-token",
            Self::Anonymous => "anonymous",
        }
    }
}

// Secrets stay out of logs: Debug never prints password/token material.
impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
            Self::Anonymous => f.write_str("Anonymous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_not_authenticated() {
        assert!(!AuthMethod::Anonymous.is_authenticated());
    }

    #[test]
    fn basic_is_authenticated() {
        let auth = AuthMethod::Basic {
            username: "deploy".into(),
            password: "hunter2".into(),
        };
        assert!(auth.is_authenticated());
    }

    #[test]
    fn display_names() {
        assert_eq!(AuthMethod::Anonymous.display_name(), "anonymous");
        assert_eq!(AuthMethod::Bearer("t".into()).display_name(), "bearer-token");
    }

    #[test]
    fn default_is_anonymous() {
        assert!(matches!(AuthMethod::default(), AuthMethod::Anonymous));
    }

    #[test]
    fn debug_redacts_secrets() {
        let basic = AuthMethod::Basic {
            username: "deploy".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{basic:?}");
        assert!(debug.contains("deploy"));
        assert!(!debug.contains("hunter2"));

        let bearer = AuthMethod::Bearer("sekrit-token".into());
        assert!(!format!("{bearer:?}").contains("sekrit"));
    }
}
