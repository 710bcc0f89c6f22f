use serde::{Deserialize, Serialize};

use crate::{FetchError, Result};

/// A requested cookbook together with the constraint it was locked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,

    #[serde(rename = "version-constraint")]
    pub version_constraint: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version_constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_constraint: version_constraint.into(),
        }
    }

    /// The exact version this dependency is pinned to.
    ///
    /// Accepts `1.2.3` and `= 1.2.3`. Ranges and pessimistic constraints are
    /// rejected: resolution has to happen before anything is fetched.
    pub fn locked_version(&self) -> Result<&str> {
        let constraint = self.version_constraint.trim();
        let version = constraint
            .strip_prefix('=')
            .map(str::trim_start)
            .unwrap_or(constraint);

        let is_exact = !version.is_empty()
            && version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '+');

        if is_exact && version.starts_with(|c: char| c.is_ascii_digit()) {
            Ok(version)
        } else {
            Err(FetchError::InvalidConstraint(format!(
                "{} ({}) is not locked to an exact version",
                self.name, self.version_constraint
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_version_exact() {
        assert_eq!(Dependency::new("nginx", "1.2.3").locked_version().unwrap(), "1.2.3");
        assert_eq!(Dependency::new("nginx", "= 1.2.3").locked_version().unwrap(), "1.2.3");
        assert_eq!(Dependency::new("nginx", " =2.0.0 ").locked_version().unwrap(), "2.0.0");
    }

    #[test]
    fn test_locked_version_rejects_ranges() {
        for constraint in ["~> 1.2", ">= 1.0.0", "", "< 2.0", "latest"] {
            let err = Dependency::new("nginx", constraint).locked_version().unwrap_err();
            assert!(matches!(err, FetchError::InvalidConstraint(_)), "{constraint}");
        }
    }
}
