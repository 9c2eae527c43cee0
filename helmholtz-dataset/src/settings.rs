use helmholtz_pairs::{ReciprocalSearch, DEFAULT_THRESHOLD_DEGREES};
use serde::{Deserialize, Serialize};

/// The settings for assembling datasets and searching for reciprocal pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelmholtzSettings {
    /// The largest angle in degrees between a light and the opposite camera for a pair to count
    #[serde(default = "default_threshold_degrees")]
    pub threshold_degrees: f64,
    /// Search view pairs in parallel when built with rayon
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Name of the parameter record inside an object directory
    #[serde(default = "default_params_file")]
    pub params_file: String,
    /// Name of the pairs record inside an object directory
    #[serde(default = "default_pairs_file")]
    pub pairs_file: String,
}

impl HelmholtzSettings {
    /// The pair search configured by these settings.
    pub fn search(&self) -> ReciprocalSearch {
        ReciprocalSearch::new(self.threshold_degrees).parallel(self.parallel)
    }
}

impl Default for HelmholtzSettings {
    fn default() -> Self {
        Self {
            threshold_degrees: default_threshold_degrees(),
            parallel: default_parallel(),
            params_file: default_params_file(),
            pairs_file: default_pairs_file(),
        }
    }
}

fn default_threshold_degrees() -> f64 {
    DEFAULT_THRESHOLD_DEGREES
}

fn default_parallel() -> bool {
    true
}

fn default_params_file() -> String {
    "params.json".to_string()
}

fn default_pairs_file() -> String {
    "helmholtz_pairs.json".to_string()
}
