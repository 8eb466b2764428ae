use crate::models::classification::ChangeClassification;
use crate::models::impact::{ImpactReport, RiskLevel};

/// "Risk & Impact": risk, scope, breaking flag and review focus.
pub fn write_impact(impact: &ImpactReport, classification: &ChangeClassification) -> String {
    let breaking = if classification.breaking {
        "- **Breaking change:** Yes (function signatures were modified)"
    } else {
        "- **Breaking change:** No"
    };

    [
        format!("- **Risk level:** {}", impact.risk_level),
        format!("- **Change scope:** {}", impact.scope),
        breaking.to_string(),
        String::new(),
        "**Review focus:**".to_string(),
        review_guidance(impact.risk_level).to_string(),
    ]
    .join("\n")
}

fn review_guidance(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => {
            "- Verify no functional behavior has changed\n\
             - Ensure formatting aligns with project conventions"
        }
        RiskLevel::Medium => {
            "- Review updated logic paths carefully\n\
             - Pay attention to edge cases and related components"
        }
        RiskLevel::High => {
            "- Perform a thorough review of logic and control flow\n\
             - Consider downstream and integration impact"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classification::{ChangeType, Confidence};
    use crate::models::impact::Scope;

    fn report(risk_level: RiskLevel) -> ImpactReport {
        ImpactReport {
            stats: None,
            risk_level,
            scope: Scope::Localized,
        }
    }

    fn classified(breaking: bool) -> ChangeClassification {
        ChangeClassification {
            change_type: ChangeType::Update,
            breaking,
            confidence: Confidence::Low,
            rationale: String::new(),
        }
    }

    #[test]
    fn low_risk_non_breaking() {
        let text = write_impact(&report(RiskLevel::Low), &classified(false));
        assert_eq!(
            text,
            "- **Risk level:** Low\n\
             - **Change scope:** Localized\n\
             - **Breaking change:** No\n\
             \n\
             **Review focus:**\n\
             - Verify no functional behavior has changed\n\
             - Ensure formatting aligns with project conventions"
        );
    }

    #[test]
    fn high_risk_breaking() {
        let text = write_impact(&report(RiskLevel::High), &classified(true));
        assert!(text.contains("- **Breaking change:** Yes (function signatures were modified)"));
        assert!(text.contains("- **Risk level:** High"));
        assert!(text.ends_with("- Consider downstream and integration impact"));
    }

    #[test]
    fn medium_guidance() {
        let text = write_impact(&report(RiskLevel::Medium), &classified(false));
        assert!(text.contains("- Review updated logic paths carefully"));
    }
}
