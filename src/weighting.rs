use serde::{Deserialize, Serialize};

/// How the discrepancy between two CRDs at radius `r` is weighted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// `exp(-r)`: differences close to the root dominate.
    #[default]
    ExponentialDecay,

    /// `ln(exp(-r)) + ln(1 + H(r - 1)) + 4`, where `H(k)` is the k-th harmonic number.
    /// Becomes negative beyond radius 5.
    LogScale,
}

impl Weighting {
    pub fn weight(self, radius: usize) -> f64 {
        let r = radius as f64;
        match self {
            Weighting::ExponentialDecay => (-r).exp(),
            Weighting::LogScale => {
                let harmonic: f64 = (1..radius).map(|i| 1.0 / i as f64).sum();
                // ln(exp(-r)) == -r
                -r + (1.0 + harmonic).ln() + 4.0
            }
        }
    }
}
