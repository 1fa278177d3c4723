//! Exists-check policy value object.

use serde::{Deserialize, Serialize};

/// How a failed existence query (other than a clean "not found") is treated.
///
/// - `Strict`: the reconciliation fails at the `exists-check` stage
/// - `Lenient`: the failure is read as "does not exist" and a create is attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExistsCheckPolicy {
    #[default]
    Strict,
    Lenient,
}

impl std::str::FromStr for ExistsCheckPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ExistsCheckPolicy::Strict),
            "lenient" => Ok(ExistsCheckPolicy::Lenient),
            other => Err(format!(
                "unknown exists-check policy '{}' (expected strict or lenient)",
                other
            )),
        }
    }
}
