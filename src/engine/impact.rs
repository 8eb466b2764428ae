use crate::models::diff::{FileDiff, ParsedDiff};
use crate::models::impact::{ImpactReport, ImpactStats, RiskLevel, Scope};

/// Churn below this is `Low` risk.
const LOW_RISK_CHURN: usize = 50;
/// Churn below this (and at least [`LOW_RISK_CHURN`]) is `Medium` risk.
const MEDIUM_RISK_CHURN: usize = 200;

impl ImpactStats {
    /// Statistics of a single file.
    pub fn from_file(file: &FileDiff) -> Self {
        Self {
            files_changed: 1,
            additions: file.additions,
            deletions: file.deletions,
        }
    }

    /// Totals over every file of a parse. `None` when nothing was parsed.
    pub fn aggregate(parsed: &ParsedDiff) -> Option<Self> {
        parsed
            .values()
            .map(Self::from_file)
            .reduce(|acc, file| Self {
                files_changed: acc.files_changed + file.files_changed,
                additions: acc.additions + file.additions,
                deletions: acc.deletions + file.deletions,
            })
    }
}

/// Risk tier by churn. Absent statistics are `Low`.
pub fn risk_level(stats: Option<&ImpactStats>) -> RiskLevel {
    let Some(stats) = stats else {
        return RiskLevel::Low;
    };
    match stats.churn() {
        c if c < LOW_RISK_CHURN => RiskLevel::Low,
        c if c < MEDIUM_RISK_CHURN => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

/// Spread of the change. Always `Localized`; multi-file spread is not analysed.
pub fn scope(_stats: Option<&ImpactStats>) -> Scope {
    Scope::Localized
}

pub fn analyze_impact(stats: Option<ImpactStats>) -> ImpactReport {
    ImpactReport {
        risk_level: risk_level(stats.as_ref()),
        scope: scope(stats.as_ref()),
        stats,
    }
}
