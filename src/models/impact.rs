use std::fmt;

use serde::{Deserialize, Serialize};

/// Size of a change set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactStats {
    pub files_changed: usize,
    pub additions: usize,
    pub deletions: usize,
}

impl ImpactStats {
    pub fn churn(&self) -> usize {
        self.additions + self.deletions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Localized,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Localized => write!(f, "Localized"),
        }
    }
}

/// Risk assessment derived from [`ImpactStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ImpactStats>,
    pub risk_level: RiskLevel,
    pub scope: Scope,
}
