//! User generation and statistics
//!
//! This module contains the population sampler and statistics about the
//! generated population.

use indexmap::IndexMap;
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};
use std::fmt;
use tracing::{debug, instrument};

use crate::sampling::{Categorical, SamplingError};
use crate::types::{GeneratorConfig, UserId};
use crate::user::User;

/// Demographic constants for the population model
pub mod demographics {
    /// Mean of the age normal distribution
    pub const AGE_MEAN: f64 = 28.0;

    /// Standard deviation of the age normal distribution
    pub const AGE_STD_DEV: f64 = 9.0;

    /// Youngest age kept after clamping
    pub const MIN_AGE: f64 = 13.0;

    /// Oldest age kept after clamping
    pub const MAX_AGE: f64 = 75.0;

    /// Mean tenure in days (exponential distribution, no upper clamp)
    pub const TENURE_MEAN_DAYS: f64 = 180.0;
}

/// Generator for the fixed user population
#[derive(Debug, Clone)]
pub struct UserGenerator {
    age: Normal<f64>,
    tenure: Exp<f64>,
    countries: Categorical<String>,
    devices: Categorical<String>,
}

impl UserGenerator {
    /// Create a user generator from the configured country and device weights
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, SamplingError> {
        let age = Normal::new(demographics::AGE_MEAN, demographics::AGE_STD_DEV)
            .map_err(|e| SamplingError::distribution("age", e))?;
        let tenure = Exp::new(1.0 / demographics::TENURE_MEAN_DAYS)
            .map_err(|e| SamplingError::distribution("tenure", e))?;

        Ok(Self {
            age,
            tenure,
            countries: Categorical::from_weights("countries", &config.countries)?,
            devices: Categorical::from_weights("devices", &config.devices)?,
        })
    }

    /// Generate exactly `count` users with sequential ids
    ///
    /// Draw order per user is age, country, device, tenure.
    #[instrument(skip(self, rng))]
    pub fn generate_users<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<User> {
        let users: Vec<User> = (0..count).map(|index| self.generate_user(index, rng)).collect();
        debug!("Generated {} users", users.len());
        users
    }

    /// Generate the user occupying population slot `index`
    pub fn generate_user<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> User {
        let age = self
            .age
            .sample(rng)
            .clamp(demographics::MIN_AGE, demographics::MAX_AGE) as u8;
        let country = self.countries.sample(rng).clone();
        let device = self.devices.sample(rng).clone();
        let tenure_days = self.tenure.sample(rng) as u32;

        User::new(UserId::from_index(index), age, country, device, tenure_days)
    }

    /// Get statistics about a generated population
    pub fn get_user_stats(&self, users: &[User]) -> UserStats {
        UserStats::from_users(users)
    }
}

/// Statistics about generated users
#[derive(Debug, Clone, Default)]
pub struct UserStats {
    /// Total number of users generated
    pub total_users: usize,
    /// Mean age
    pub average_age: f64,
    /// Mean tenure in days
    pub average_tenure_days: f64,
    /// Users per country, in first-seen order
    pub country_distribution: IndexMap<String, usize>,
    /// Users per device, in first-seen order
    pub device_distribution: IndexMap<String, usize>,
}

impl UserStats {
    /// Summarize a population
    pub fn from_users(users: &[User]) -> Self {
        let mut stats = Self { total_users: users.len(), ..Default::default() };
        if users.is_empty() {
            return stats;
        }

        let total = users.len() as f64;
        stats.average_age = users.iter().map(|u| u.age as f64).sum::<f64>() / total;
        stats.average_tenure_days = users.iter().map(|u| u.tenure_days as f64).sum::<f64>() / total;

        for user in users {
            *stats.country_distribution.entry(user.country.clone()).or_insert(0) += 1;
            *stats.device_distribution.entry(user.device.clone()).or_insert(0) += 1;
        }
        stats
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_users > 0 {
            (count as f64 / self.total_users as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User Generation Statistics:")?;
        writeln!(f, "  Total Users: {}", self.total_users)?;
        writeln!(f, "  Average Age: {:.1}", self.average_age)?;
        writeln!(f, "  Average Tenure: {:.1} days", self.average_tenure_days)?;
        writeln!(f, "  Country Distribution:")?;
        for (country, count) in &self.country_distribution {
            writeln!(f, "    {}: {} users ({:.1}%)", country, count, self.percentage(*count))?;
        }
        writeln!(f, "  Device Distribution:")?;
        for (device, count) in &self.device_distribution {
            writeln!(f, "    {}: {} users ({:.1}%)", device, count, self.percentage(*count))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_generator() -> UserGenerator {
        UserGenerator::from_config(&GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_user_generation_count_and_ids() {
        let generator = create_test_generator();
        let mut rng = StdRng::seed_from_u64(42);
        let users = generator.generate_users(25, &mut rng);

        assert_eq!(users.len(), 25);
        for (index, user) in users.iter().enumerate() {
            assert_eq!(user.user_id, UserId::from_index(index));
        }
        assert_eq!(users[0].user_id.to_string(), "U000000");
        assert_eq!(users[24].user_id.to_string(), "U000024");
    }

    #[test]
    fn test_ages_are_clamped() {
        let generator = create_test_generator();
        let mut rng = StdRng::seed_from_u64(3);
        let users = generator.generate_users(5_000, &mut rng);

        assert!(users.iter().all(|u| (13..=75).contains(&u.age)));
        // Mean 28 with std 9 clips at 13 often enough to show up in 5k draws
        assert!(users.iter().any(|u| u.age == 13));
    }

    #[test]
    fn test_categories_come_from_configuration() {
        let config = GeneratorConfig::default();
        let generator = create_test_generator();
        let mut rng = StdRng::seed_from_u64(11);

        for user in generator.generate_users(500, &mut rng) {
            assert!(config.countries.contains_key(&user.country));
            assert!(config.devices.contains_key(&user.device));
        }
    }

    #[test]
    fn test_tenure_mean_is_near_configured_mean() {
        let generator = create_test_generator();
        let mut rng = StdRng::seed_from_u64(5);
        let users = generator.generate_users(20_000, &mut rng);
        let stats = generator.get_user_stats(&users);

        assert!((160.0..200.0).contains(&stats.average_tenure_days));
    }

    #[test]
    fn test_generation_is_reproducible() {
        let generator = create_test_generator();
        let first = generator.generate_users(50, &mut StdRng::seed_from_u64(8));
        let second = generator.generate_users(50, &mut StdRng::seed_from_u64(8));
        assert_eq!(first, second);
    }

    #[test]
    fn test_user_stats_display() {
        let users = vec![
            User::new(UserId(0), 20, "US", "Android", 10),
            User::new(UserId(1), 40, "US", "iOS", 30),
        ];
        let stats = UserStats::from_users(&users);

        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.average_age, 30.0);
        assert_eq!(stats.country_distribution["US"], 2);

        let display = stats.to_string();
        assert!(display.contains("Total Users: 2"));
        assert!(display.contains("US: 2 users (100.0%)"));
        assert!(display.contains("Android: 1 users (50.0%)"));
    }

    #[test]
    fn test_empty_user_stats() {
        let stats = UserStats::from_users(&[]);
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.average_age, 0.0);
    }
}
