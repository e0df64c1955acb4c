//! Customization knobs applied at generation time.
//!
//! Every field carries a serde default so a persisted blob from an older
//! version (or with unknown extra keys) still loads; missing fields fall
//! back to defaults instead of failing the whole payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Scales the experiment budget (and with it every channel's share).
    #[serde(default = "default_multiplier")]
    pub budget_multiplier: f64,
    /// Scales the daily noise band: 1.0 keeps the stock ±15% band.
    #[serde(default = "default_multiplier")]
    pub performance_variance: f64,
    /// Linear upward ramp across the window.
    #[serde(default = "default_enabled")]
    pub trend_enabled: bool,
    /// Weekend dips (weekly seasonality).
    #[serde(default = "default_enabled")]
    pub seasonal_effects: bool,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_enabled() -> bool {
    true
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            budget_multiplier: 1.0,
            performance_variance: 1.0,
            trend_enabled: true,
            seasonal_effects: true,
        }
    }
}

/// Field-wise update applied over the current options. `None` leaves the
/// current value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsPatch {
    pub budget_multiplier: Option<f64>,
    pub performance_variance: Option<f64>,
    pub trend_enabled: Option<bool>,
    pub seasonal_effects: Option<bool>,
}

impl GenerationOptions {
    pub fn apply(&mut self, patch: &OptionsPatch) {
        if let Some(v) = patch.budget_multiplier {
            self.budget_multiplier = v;
        }
        if let Some(v) = patch.performance_variance {
            self.performance_variance = v;
        }
        if let Some(v) = patch.trend_enabled {
            self.trend_enabled = v;
        }
        if let Some(v) = patch.seasonal_effects {
            self.seasonal_effects = v;
        }
    }
}
