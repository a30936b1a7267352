//! TOML-based dashboard configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::roi::{
    BaselineFigures, CloudControls, ControlSettings, MAX_COOLING_DELTA_F, MAX_SHIFT_PCT,
    OperatorControls,
};
use crate::engine::types::Persona;
use crate::synth::{ATLANTA_ZIPS, DEFAULT_ZIP};

/// Top-level dashboard configuration parsed from TOML.
///
/// All fields have defaults matching the operator preset. Load from TOML
/// with [`DashboardConfig::from_toml_file`] or use
/// [`DashboardConfig::operator`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Zone, persona, and run parameters.
    #[serde(default)]
    pub dashboard: DashboardSection,
    /// Per-persona baseline figures.
    #[serde(default)]
    pub baseline: BaselineSection,
    /// Facility operator lever settings.
    #[serde(default)]
    pub operator: OperatorControls,
    /// Cloud workload lever settings.
    #[serde(default)]
    pub cloud: CloudControls,
    /// Recommendation text provider.
    #[serde(default)]
    pub recommendation: RecommendationConfig,
}

/// Zone, persona, and run parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardSection {
    /// Zone shown on the zone page.
    pub zip: String,
    /// Persona the ROI projection is made for.
    pub persona: Persona,
    /// Seed for the synthetic hourly trend.
    pub seed: u64,
    /// Display name passed through to recommendation text.
    pub company_name: String,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            zip: DEFAULT_ZIP.to_string(),
            persona: Persona::Operator,
            seed: 42,
            company_name: "Demo Company".to_string(),
        }
    }
}

/// Per-persona baseline figures.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaselineSection {
    /// Facility operator baseline.
    pub operator: BaselineFigures,
    /// Cloud workload baseline.
    pub cloud: BaselineFigures,
}

impl Default for BaselineSection {
    fn default() -> Self {
        Self {
            operator: BaselineFigures::operator_default(),
            cloud: BaselineFigures::cloud_default(),
        }
    }
}

impl BaselineSection {
    /// Baseline for `persona`.
    pub fn for_persona(&self, persona: Persona) -> &BaselineFigures {
        match persona {
            Persona::Operator => &self.operator,
            Persona::Cloud => &self.cloud,
        }
    }
}

/// Recommendation text provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommendationConfig {
    /// `"rule-based"` or `"openai"`.
    pub provider: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Bound on the single external attempt (seconds, > 0).
    pub timeout_secs: u64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            provider: "rule-based".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-5".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 20,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"dashboard.zip"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl DashboardConfig {
    /// Returns the operator preset (reference facility baseline and levers).
    pub fn operator() -> Self {
        Self {
            dashboard: DashboardSection::default(),
            baseline: BaselineSection::default(),
            operator: OperatorControls::default(),
            cloud: CloudControls::default(),
            recommendation: RecommendationConfig::default(),
        }
    }

    /// Returns the cloud preset: cloud persona shifting 30% to us-west.
    pub fn cloud() -> Self {
        Self {
            dashboard: DashboardSection {
                persona: Persona::Cloud,
                ..DashboardSection::default()
            },
            ..Self::operator()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["operator", "cloud"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "operator" => Ok(Self::operator()),
            "cloud" => Ok(Self::cloud()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Lever settings for the configured persona.
    pub fn controls(&self) -> ControlSettings {
        match self.dashboard.persona {
            Persona::Operator => ControlSettings::Operator(self.operator.clone()),
            Persona::Cloud => ControlSettings::Cloud(self.cloud.clone()),
        }
    }

    /// Baseline for the configured persona.
    pub fn persona_baseline(&self) -> &BaselineFigures {
        self.baseline.for_persona(self.dashboard.persona)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Lever ranges are
    /// checked for both personas, not only the active one.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let d = &self.dashboard;
        if !ATLANTA_ZIPS.contains(&d.zip.as_str()) {
            errors.push(ConfigError::new(
                "dashboard.zip",
                format!("\"{}\" is not in the zone dataset", d.zip),
            ));
        }

        for (prefix, b) in [
            ("baseline.operator", &self.baseline.operator),
            ("baseline.cloud", &self.baseline.cloud),
        ] {
            for (name, value) in [
                ("energy_kwh", b.energy_kwh),
                ("cost_usd", b.cost_usd),
                ("emissions_kg", b.emissions_kg),
            ] {
                if !value.is_finite() || value < 0.0 {
                    errors.push(ConfigError::new(format!("{prefix}.{name}"), "must be >= 0"));
                }
            }
            if !(0.0..=100.0).contains(&b.cii) {
                errors.push(ConfigError::new(
                    format!("{prefix}.cii"),
                    "must be in [0, 100]",
                ));
            }
        }

        let o = &self.operator;
        for (name, value, max) in [
            ("operator.cooling_setpoint_delta_f", o.cooling_setpoint_delta_f, MAX_COOLING_DELTA_F),
            ("operator.containment_pct", o.containment_pct, 100.0),
            ("operator.batch_deferral_pct", o.batch_deferral_pct, 100.0),
            ("cloud.shift_pct", self.cloud.shift_pct, MAX_SHIFT_PCT),
        ] {
            if !(0.0..=max).contains(&value) {
                errors.push(ConfigError::new(name, format!("must be in [0, {max}]")));
            }
        }
        if o.cooling_setpoint_delta_f.fract() != 0.0 {
            errors.push(ConfigError::new(
                "operator.cooling_setpoint_delta_f",
                "must be a whole number of degrees",
            ));
        }

        let r = &self.recommendation;
        if r.provider != "rule-based" && r.provider != "openai" {
            errors.push(ConfigError::new(
                "recommendation.provider",
                format!("must be \"rule-based\" or \"openai\", got \"{}\"", r.provider),
            ));
        }
        if r.timeout_secs == 0 {
            errors.push(ConfigError::new("recommendation.timeout_secs", "must be > 0"));
        }

        errors
    }
}
