//! Uniform random sampling of records.

use crate::dataset::PaperRecord;
use crate::error::{ExplorerError, Result};
use rand::seq::index;
use rand::Rng;

/// Draw `n` records uniformly at random without replacement.
///
/// # Errors
///
/// Returns [`ExplorerError::InsufficientData`] when the collection holds
/// fewer than `n` records. Callers may recover by asking for fewer.
pub fn sample(records: &[PaperRecord], n: usize) -> Result<Vec<&PaperRecord>> {
    sample_with_rng(records, n, &mut rand::thread_rng())
}

/// Same as [`sample`], with a caller-provided RNG so draws can be reproduced.
pub fn sample_with_rng<'a, R>(
    records: &'a [PaperRecord],
    n: usize,
    rng: &mut R,
) -> Result<Vec<&'a PaperRecord>>
where
    R: Rng + ?Sized,
{
    if records.len() < n {
        return Err(ExplorerError::InsufficientData {
            requested: n,
            available: records.len(),
        });
    }

    Ok(index::sample(rng, records.len(), n)
        .into_iter()
        .map(|i| &records[i])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn records(n: usize) -> Vec<PaperRecord> {
        (0..n)
            .map(|i| PaperRecord {
                title: Some(format!("Paper {i}")),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_sample_without_replacement() -> Result<()> {
        let population = records(20);
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = sample_with_rng(&population, 5, &mut rng)?;
        assert_eq!(drawn.len(), 5);

        let titles: HashSet<&str> = drawn.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles.len(), 5);
        Ok(())
    }

    #[test]
    fn test_sample_whole_population() -> Result<()> {
        let population = records(4);
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = sample_with_rng(&population, 4, &mut rng)?;
        let titles: HashSet<&str> = drawn.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles.len(), 4);
        Ok(())
    }

    #[test]
    fn test_sample_insufficient() {
        let population = records(3);
        let mut rng = StdRng::seed_from_u64(7);

        match sample_with_rng(&population, 5, &mut rng) {
            Err(ExplorerError::InsufficientData {
                requested,
                available,
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("expected InsufficientData, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_sample_zero() -> Result<()> {
        assert!(sample(&[], 0)?.is_empty());
        Ok(())
    }
}
