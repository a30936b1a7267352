//! Prompt construction from already-computed ROI numbers.

use crate::engine::roi::{ControlSettings, RoiResult};

use super::fallback::format_usd;

/// System instruction sent with every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are an energy & ESG advisor. Be precise, concise, and \
     businesslike. Provide actionable recommendations based on the data provided.";

/// Upper bound on generated tokens requested from the provider.
pub const MAX_COMPLETION_TOKENS: u32 = 500;

/// System and user messages for one recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPrompt {
    pub system: String,
    pub user: String,
}

/// Builds the prompt from the company name, ROI figures, and lever settings.
///
/// No new figures are computed here; every number comes from `roi` or
/// `controls`.
pub fn build_prompt(
    company_name: &str,
    roi: &RoiResult,
    controls: &ControlSettings,
) -> RecommendationPrompt {
    let persona = controls.persona();
    let strategy = match controls {
        ControlSettings::Operator(c) => format!(
            "Optimization Strategy:\n\
             - Cooling setpoint increase: +{}°F\n\
             - Hot/cold containment: {}%\n\
             - Batch job deferral: {}% (peak → off-peak)",
            c.cooling_setpoint_delta_f, c.containment_pct, c.batch_deferral_pct
        ),
        ControlSettings::Cloud(c) => format!(
            "Optimization Strategy:\n\
             - Workload shift: {}% of training jobs\n\
             - Target region: {}\n\
             - Target hours: {}",
            c.shift_pct, c.target_region, c.target_hours
        ),
    };

    let user = format!(
        "Company: {company_name} | Persona: {}\n\n\
         Financial Impact:\n\
         - Cost savings: {} ({:.1}% reduction)\n\
         - Emissions avoided: {:.2} tons CO₂\n\
         - Community Impact Index improvement: +{:.1} points\n\n\
         {strategy}\n\n\
         Task: Draft a short, executive-level recommendation (3-5 bullets) explaining:\n\
         1. Key opportunities for optimization\n\
         2. Expected benefits (cost, carbon, community impact)\n\
         3. Implementation considerations\n\
         4. Next steps\n\n\
         Avoid speculative claims. Only use the provided numbers. Be concise and actionable.",
        persona.description(),
        format_usd(roi.cost_saved_usd),
        roi.savings_pct,
        roi.emissions_avoided_tons,
        roi.cii_delta,
    );

    RecommendationPrompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::roi::{CloudControls, OperatorControls};

    fn roi() -> RoiResult {
        RoiResult {
            cost_saved_usd: 17_850.0,
            savings_pct: 21.0,
            emissions_avoided_tons: 71.4,
            cii_delta: 8.7,
        }
    }

    #[test]
    fn operator_prompt_carries_roi_and_levers() {
        let controls = ControlSettings::Operator(OperatorControls::default());
        let prompt = build_prompt("Acme DC", &roi(), &controls);
        assert!(prompt.user.contains("Company: Acme DC | Persona: Data Center Operator"));
        assert!(prompt.user.contains("$17,850 (21.0% reduction)"));
        assert!(prompt.user.contains("71.40 tons"));
        assert!(prompt.user.contains("+8.7 points"));
        assert!(prompt.user.contains("Cooling setpoint increase: +2°F"));
        assert_eq!(prompt.system, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn cloud_prompt_names_region_and_window() {
        let controls = ControlSettings::Cloud(CloudControls::default());
        let prompt = build_prompt("Acme Cloud", &roi(), &controls);
        assert!(prompt.user.contains("Cloud/Data-Using Company"));
        assert!(prompt.user.contains("Target region: us-west"));
        assert!(prompt.user.contains("Target hours: 9pm-1am"));
        assert!(!prompt.user.contains("Cooling"));
    }
}
