//! Weighted categorical sampling
//!
//! One primitive serves every categorical draw in the generator: intents,
//! countries, devices, channels and locales. Weights are normalized into a
//! cumulative distribution and each draw consumes a single uniform variate.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::SamplingError;

/// Categorical distribution over `T` built from an ordered category → weight mapping
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    categories: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T> Categorical<T> {
    /// Build from `(category, weight)` pairs, preserving their order
    ///
    /// `name` identifies the mapping in error messages.
    pub fn new<I>(name: &str, pairs: I) -> Result<Self, SamplingError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let (categories, weights): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|source| SamplingError::Categorical { name: name.to_string(), source })?;
        Ok(Self { categories, index })
    }

    /// Draw one category
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.categories[self.index.sample(rng)]
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[T] {
        &self.categories
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the distribution has no categories (never true once built)
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Categorical<String> {
    /// Build from a string-keyed weight mapping such as a configured `WeightMap`
    pub fn from_weights<'a, I>(name: &str, weights: I) -> Result<Self, SamplingError>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        Self::new(name, weights.into_iter().map(|(category, weight)| (category.clone(), *weight)))
    }
}
