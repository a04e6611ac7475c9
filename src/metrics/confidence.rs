//! Normal-approximation error bars for per-team averages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported confidence levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    P90,
    #[default]
    P95,
    P99,
}

impl Confidence {
    /// Two-sided z-value for this level
    pub fn z(&self) -> f64 {
        match self {
            Confidence::P90 => 1.645,
            Confidence::P95 => 1.96,
            Confidence::P99 => 2.576,
        }
    }

    pub fn level(&self) -> f64 {
        match self {
            Confidence::P90 => 0.90,
            Confidence::P95 => 0.95,
            Confidence::P99 => 0.99,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.level() * 100.0)
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('%') {
            "0.90" | "0.9" | "90" => Ok(Confidence::P90),
            "0.95" | "95" => Ok(Confidence::P95),
            "0.99" | "99" => Ok(Confidence::P99),
            other => Err(format!(
                "unsupported confidence level `{}` (use 0.90, 0.95 or 0.99)",
                other
            )),
        }
    }
}

/// Half-width of the error bar: `z * std_dev / sqrt(n)`
pub fn standard_error(std_dev: f64, n: usize, confidence: Confidence) -> f64 {
    if n == 0 {
        return 0.0;
    }
    confidence.z() * (std_dev / (n as f64).sqrt())
}

/// Mean, spread and sample size of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub n: usize,
}

impl MetricSummary {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                n,
            };
        }

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        Self {
            mean,
            std_dev: variance.sqrt(),
            n,
        }
    }

    pub fn error(&self, confidence: Confidence) -> f64 {
        standard_error(self.std_dev, self.n, confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_table() {
        assert_eq!(Confidence::P90.z(), 1.645);
        assert_eq!(Confidence::P95.z(), 1.96);
        assert_eq!(Confidence::P99.z(), 2.576);
        assert_eq!(Confidence::default(), Confidence::P95);
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("0.9".parse::<Confidence>().unwrap(), Confidence::P90);
        assert_eq!("95%".parse::<Confidence>().unwrap(), Confidence::P95);
        assert_eq!("0.99".parse::<Confidence>().unwrap(), Confidence::P99);
        assert!("0.5".parse::<Confidence>().is_err());
        assert_eq!(Confidence::P95.to_string(), "95%");
    }

    #[test]
    fn test_summary_matches_population_std() {
        let summary = MetricSummary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(summary.n, 8);

        let expected = 1.96 * 2.0 / 8f64.sqrt();
        assert!((summary.error(Confidence::P95) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary() {
        let summary = MetricSummary::from_samples(&[]);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.error(Confidence::P99), 0.0);
    }
}
