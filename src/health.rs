//! Plant health evaluator.
//!
//! Counts how many of the three environmental readings sit outside their
//! ideal band and maps the count to a stress level.  The problem counter is
//! local to each call, so evaluations never influence one another.

use crate::config::{Band, SystemConfig};

/// Stress classification shown on the health panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    MildStress,
    ModerateStress,
    SevereStress,
}

impl HealthStatus {
    /// Panel label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "saudavel",
            Self::MildStress => "leve estresse",
            Self::ModerateStress => "medio estresse",
            Self::SevereStress => "grave estresse",
        }
    }

    fn from_problem_count(problems: u8) -> Self {
        match problems {
            0 => Self::Healthy,
            1 => Self::MildStress,
            2 => Self::ModerateStress,
            _ => Self::SevereStress,
        }
    }
}

/// Ideal bands the evaluator checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdealBands {
    pub light: Band,
    pub temperature: Band,
    pub moisture: Band,
}

impl IdealBands {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            light: config.ideal_light,
            temperature: config.ideal_temperature,
            moisture: config.ideal_moisture,
        }
    }
}

impl Default for IdealBands {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

/// Classify the plant from light, temperature and moisture percentages.
pub fn evaluate(bands: &IdealBands, light: u8, temperature: u8, moisture: u8) -> HealthStatus {
    let problems = [
        (bands.light, light),
        (bands.temperature, temperature),
        (bands.moisture, moisture),
    ]
    .iter()
    .filter(|(band, value)| !band.contains(*value))
    .count() as u8;

    HealthStatus::from_problem_count(problems)
}
