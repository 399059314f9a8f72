//! Environment ⇄ branch reference naming.
//!
//! An environment is represented one-to-one by a branch: environment
//! `"test"` lives at the fully-qualified reference `"refs/heads/test"`.
//! Validation follows git branch-name conventions, reduced to what
//! environment names actually need.

use crate::error::{SourceError, SourceResult};

const BRANCH_PREFIX: &str = "refs/heads/";

/// Characters that are forbidden anywhere in an environment name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// The fully-qualified branch reference for an environment.
pub fn branch_ref(environment: &str) -> String {
    format!("{BRANCH_PREFIX}{environment}")
}

/// The environment name of a branch reference, if it is one.
pub fn environment_name(ref_name: &str) -> Option<&str> {
    ref_name.strip_prefix(BRANCH_PREFIX)
}

/// Validate an environment name, returning `Ok(())` if usable as a branch
/// name.
pub fn validate_environment_name(name: &str) -> SourceResult<()> {
    let invalid = |reason: &str| SourceError::InvalidEnvironment {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(&format!("contains forbidden character {ch:?}")));
        }
    }
    if name.contains("..") {
        return Err(invalid("must not contain '..'"));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid("must not start or end with '.'"));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid("must not start or end with '/'"));
    }
    if name.contains("//") {
        return Err(invalid("must not contain consecutive slashes"));
    }
    Ok(())
}
