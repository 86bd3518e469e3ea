use serde::{Deserialize, Serialize};
use socnet_core::errors::{ErrorInfo, NetError};

/// Parameters of the stochastic degree-sequence generator.
///
/// The linking-probability `profile` is read positionally: `profile[0]` is the
/// probability that a freshly created link is reciprocated, and `profile[k]`
/// for `k >= 1` weights the number of walks of length `k + 1` between two
/// nodes when deciding whether to close the link transitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of nodes (rows) in the generated matrix.
    pub nodes: usize,
    /// Mean of the normal distribution target degrees are drawn from.
    #[serde(default = "default_mean_degree")]
    pub mean_degree: f64,
    /// Standard deviation of the target degree distribution.
    #[serde(default = "default_std_dev")]
    pub std_dev: f64,
    /// Number of rows seeded at once when propagation stalls.
    #[serde(default = "default_seed_batch")]
    pub seed_batch: usize,
    /// Linking-probability profile, see the type level documentation.
    #[serde(default = "default_profile")]
    pub profile: Vec<f64>,
    /// Whether links are directed. Undirected generation keeps the matrix symmetric.
    #[serde(default = "default_directed")]
    pub directed: bool,
}

fn default_mean_degree() -> f64 {
    4.0
}

fn default_std_dev() -> f64 {
    1.0
}

fn default_seed_batch() -> usize {
    1
}

fn default_profile() -> Vec<f64> {
    vec![0.5, 0.1]
}

fn default_directed() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: 50,
            mean_degree: default_mean_degree(),
            std_dev: default_std_dev(),
            seed_batch: default_seed_batch(),
            profile: default_profile(),
            directed: default_directed(),
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, NetError> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            NetError::Config(ErrorInfo::new("parse-config", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Probability that a new link is reciprocated (`profile[0]`, or `0` when empty).
    pub fn reciprocity(&self) -> f64 {
        self.profile.first().copied().unwrap_or(0.0)
    }

    /// Weights applied to walk counts of length two and more.
    pub fn walk_weights(&self) -> &[f64] {
        self.profile.get(1..).unwrap_or(&[])
    }

    /// Checks that every parameter lies in its admissible range.
    pub fn validate(&self) -> Result<(), NetError> {
        if self.nodes < 2 {
            return Err(invalid("nodes", "at least two nodes are required", self.nodes));
        }
        if !self.mean_degree.is_finite() || self.mean_degree <= 0.0 {
            return Err(invalid(
                "mean_degree",
                "mean degree must be positive and finite",
                self.mean_degree,
            ));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(invalid(
                "std_dev",
                "standard deviation must be non-negative and finite",
                self.std_dev,
            ));
        }
        if self.seed_batch == 0 {
            return Err(invalid("seed_batch", "seed batch must be positive", self.seed_batch));
        }
        for (position, probability) in self.profile.iter().enumerate() {
            if !(0.0..=1.0).contains(probability) {
                return Err(invalid(
                    "profile",
                    "profile entries must be probabilities",
                    probability,
                )
                .with_context("position", position));
            }
        }
        let walk_total: f64 = self.walk_weights().iter().sum();
        if walk_total > 1.0 {
            return Err(invalid(
                "profile",
                "walk weights must not sum above one",
                walk_total,
            ));
        }
        Ok(())
    }
}

fn invalid(parameter: &str, message: &str, value: impl ToString) -> NetError {
    NetError::Generator(
        ErrorInfo::new("invalid-parameter", message)
            .with_context("parameter", parameter)
            .with_context("value", value.to_string()),
    )
}
