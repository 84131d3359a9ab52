//! Advisory text for an assessment.
//!
//! Rules are cumulative: a score above 60 receives every item from the
//! higher rule and the lower one. The baseline item always comes last.

use laras_risk_models::RiskTier;

struct Rule {
    /// Applies when the score is strictly greater than this.
    above: u8,
    items: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        above: 60,
        items: &[
            "Consult with a property lawyer before proceeding",
            "Request official land acquisition status from local authorities",
        ],
    },
    Rule {
        above: 30,
        items: &[
            "Set up alerts for project updates in this area",
            "Research compensation rates for similar cases",
            "Monitor government gazette notifications",
        ],
    },
];

const BASELINE: &str = "Keep all property documents readily accessible";

/// Advisory items for `score`, most urgent first.
#[must_use]
pub fn recommendations(score: u8) -> Vec<String> {
    RULES
        .iter()
        .filter(|rule| score > rule.above)
        .flat_map(|rule| rule.items.iter())
        .chain(std::iter::once(&BASELINE))
        .map(|s| (*s).to_string())
        .collect()
}

/// One-sentence summary for a tier.
#[must_use]
pub const fn summary(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::VeryLow | RiskTier::Low => {
            "This property appears to be at low risk of land acquisition."
        }
        RiskTier::Medium => {
            "This property has moderate risk. We recommend further investigation."
        }
        RiskTier::High | RiskTier::Critical => {
            "This property has high risk of land acquisition. Proceed with caution."
        }
    }
}
