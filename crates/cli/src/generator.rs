//! Synthetic lane count stream for demo runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use traffic_facade::{GeneratorConfig, TrafficError};

/// Produces one noisy, slowly rising count vector per step.
pub struct SyntheticStream {
    config: GeneratorConfig,
    base_counts: Vec<i64>,
    step: u64,
    rng: StdRng,
}

impl SyntheticStream {
    pub fn new(num_lanes: usize, config: GeneratorConfig) -> Result<Self, TrafficError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let base_counts = (0..num_lanes)
            .map(|_| rng.gen_range(config.base_min..config.base_max))
            .collect();

        Ok(Self {
            config,
            base_counts,
            step: 0,
            rng,
        })
    }

    pub fn base_counts(&self) -> &[i64] {
        &self.base_counts
    }

    /// Next observation, clipped at zero.
    pub fn next_counts(&mut self) -> Vec<f64> {
        let trend = (self.step / self.config.trend_interval) as i64 * self.config.trend_increment;
        let noise = self.config.noise;
        let counts = self
            .base_counts
            .iter()
            .map(|&base| {
                let jitter = self.rng.gen_range(-noise..=noise);
                (base + jitter + trend).max(0) as f64
            })
            .collect();
        self.step += 1;
        counts
    }
}

impl Iterator for SyntheticStream {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_counts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_stream_is_reproducible() {
        let a: Vec<Vec<f64>> = SyntheticStream::new(4, GeneratorConfig::seeded(9))
            .unwrap()
            .take(10)
            .collect();
        let b: Vec<Vec<f64>> = SyntheticStream::new(4, GeneratorConfig::seeded(9))
            .unwrap()
            .take(10)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_counts_stay_in_band() {
        let config = GeneratorConfig::seeded(1);
        let mut stream = SyntheticStream::new(3, config.clone()).unwrap();
        assert!(stream
            .base_counts()
            .iter()
            .all(|&b| b >= config.base_min && b < config.base_max));

        for step in 0..20u64 {
            let trend = (step / config.trend_interval) as f64 * config.trend_increment as f64;
            for c in stream.next_counts() {
                assert!(c >= 0.0);
                assert!(c <= (config.base_max + config.noise) as f64 + trend);
            }
        }
    }

    #[test]
    fn test_clipped_at_zero() {
        let config = GeneratorConfig {
            base_min: 0,
            base_max: 1,
            noise: 50,
            seed: Some(3),
            ..GeneratorConfig::default()
        };
        let stream = SyntheticStream::new(5, config).unwrap();
        assert!(stream.take(30).flatten().all(|c| c >= 0.0));
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = GeneratorConfig {
            base_min: 5,
            base_max: 5,
            ..GeneratorConfig::default()
        };
        assert!(SyntheticStream::new(2, config).is_err());
    }
}
