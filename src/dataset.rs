//! # Dataset Store
//!
//! Holds the sorted integer sequence under search and the parsers that turn
//! raw prompt text into dataset contents.
//!
//! ## States
//!
//! - **unset**: nothing loaded yet, or cleared by reset
//! - **empty**: loaded with zero elements (random generation of size 0)
//! - **loaded**: one or more values, always sorted ascending
//!
//! Unset and empty both block searching. Values live in an immutable
//! `Arc<[i32]>` that is replaced wholesale, never edited, so a search worker
//! can hold a snapshot while the UI loads something else. Every replacement
//! bumps [`Dataset::generation`], which lets late search results and running
//! animations detect that they refer to data that is gone.

use crate::error::InputError;
use rand::Rng;
use std::sync::Arc;

/// Smallest value produced by random generation (inclusive).
pub const RANDOM_MIN: i32 = 1;

/// Upper bound of random generation (exclusive).
pub const RANDOM_MAX: i32 = 100;

/// Default upper limit on the random generation size.
pub const DEFAULT_MAX_RANDOM_SIZE: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    values: Option<Arc<[i32]>>,
    generation: u64,
}

impl Dataset {
    /// An unset dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted values, or `None` while unset.
    pub fn values(&self) -> Option<&[i32]> {
        self.values.as_deref()
    }

    /// Cheap shared handle to the current values for a worker.
    pub fn snapshot(&self) -> Option<Arc<[i32]>> {
        self.values.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.values().map_or(0, <[i32]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_unset(&self) -> bool {
        self.values.is_none()
    }

    /// Sort `values` and make them the new dataset.
    pub fn replace(&mut self, mut values: Vec<i32>) {
        values.sort_unstable();
        self.values = Some(values.into());
        self.generation += 1;
    }

    /// Return to the unset state. Clearing an unset dataset changes nothing.
    pub fn clear(&mut self) {
        if self.values.take().is_some() {
            self.generation += 1;
        }
    }
}

/// Parse comma-separated integers such as `"5, 3,8,1"`.
///
/// Whitespace around each token is ignored. Any empty or non-integer token
/// rejects the whole input.
pub fn parse_values(raw: &str) -> Result<Vec<i32>, InputError> {
    raw.split(',')
        .map(str::trim)
        .map(|token| {
            token.parse::<i32>().map_err(|_| InputError::InvalidArray {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a random generation size in `0..=max`.
pub fn parse_size(raw: &str, max: usize) -> Result<usize, InputError> {
    match raw.trim().parse::<usize>() {
        Ok(size) if size <= max => Ok(size),
        _ => Err(InputError::InvalidSize {
            raw: raw.to_string(),
        }),
    }
}

/// Parse a search target.
pub fn parse_target(raw: &str) -> Result<i32, InputError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| InputError::InvalidTarget {
            raw: raw.to_string(),
        })
}

/// `size` uniform values in `[RANDOM_MIN, RANDOM_MAX)`, sorted ascending.
pub fn random_values<R: Rng>(size: usize, rng: &mut R) -> Vec<i32> {
    let mut values: Vec<i32> = (0..size)
        .map(|_| rng.random_range(RANDOM_MIN..RANDOM_MAX))
        .collect();
    values.sort_unstable();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_dataset_is_unset() {
        let dataset = Dataset::new();
        assert!(dataset.is_unset());
        assert!(dataset.is_empty());
        assert_eq!(dataset.values(), None);
        assert_eq!(dataset.generation(), 0);
    }

    #[test]
    fn test_replace_sorts_and_bumps_generation() {
        let mut dataset = Dataset::new();
        dataset.replace(vec![5, 3, 8, 1]);
        assert_eq!(dataset.values(), Some(&[1, 3, 5, 8][..]));
        assert_eq!(dataset.generation(), 1);

        dataset.replace(vec![2]);
        assert_eq!(dataset.generation(), 2);
    }

    #[test]
    fn test_empty_is_distinct_from_unset() {
        let mut dataset = Dataset::new();
        dataset.replace(Vec::new());
        assert!(!dataset.is_unset());
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let mut dataset = Dataset::new();
        dataset.replace(vec![1, 2, 3]);
        let snapshot = dataset.snapshot().expect("loaded");
        dataset.replace(vec![9]);
        assert_eq!(&snapshot[..], &[1, 2, 3]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut dataset = Dataset::new();
        dataset.replace(vec![1]);
        dataset.clear();
        let once = dataset.clone();
        dataset.clear();
        assert_eq!(dataset, once);
        assert!(dataset.is_unset());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("5,3,8,1"), Ok(vec![5, 3, 8, 1]));
        assert_eq!(parse_values(" 5 , -3 ,+8"), Ok(vec![5, -3, 8]));
    }

    #[test]
    fn test_parse_values_rejects_bad_tokens() {
        assert!(matches!(
            parse_values("1,two,3"),
            Err(InputError::InvalidArray { token }) if token == "two"
        ));
        assert!(parse_values("").is_err());
        assert!(parse_values("1,,2").is_err());
        assert!(parse_values("1,2,").is_err());
        assert!(parse_values("99999999999").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("10", 200), Ok(10));
        assert_eq!(parse_size(" 0 ", 200), Ok(0));
        assert!(parse_size("-1", 200).is_err());
        assert!(parse_size("ten", 200).is_err());
        assert!(parse_size("201", 200).is_err());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("8"), Ok(8));
        assert_eq!(parse_target(" -4 "), Ok(-4));
        assert!(parse_target("abc").is_err());
        assert!(parse_target("").is_err());
        assert!(parse_target("1.5").is_err());
    }

    #[test]
    fn test_random_values_sorted_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = random_values(50, &mut rng);
        assert_eq!(values.len(), 50);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values
            .iter()
            .all(|v| (RANDOM_MIN..RANDOM_MAX).contains(v)));
    }
}
