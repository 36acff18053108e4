//! Growing insured-car path

use super::draws::{DrawLog, DrawStep};
use rand::Rng;

/// Draw one insured-car count per year.
///
/// Each count is uniform on `[lower, max_cars]` and capped at `max_cars`;
/// it then becomes the next year's `lower`, so the path never decreases.
pub fn exposure_path<R: Rng + ?Sized>(
    rng: &mut R,
    years: &[i32],
    min_cars: u32,
    max_cars: u32,
    log: &mut DrawLog,
) -> Vec<u32> {
    let mut lower = min_cars;
    years
        .iter()
        .map(|&year| {
            let cars = rng.random_range(lower..=max_cars).min(max_cars);
            log.record(year, DrawStep::Exposure);
            lower = cars;
            cars
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_path_is_monotone_and_bounded() {
        for seed in 0..200 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut log = DrawLog::default();
            let path = exposure_path(&mut rng, &[2020, 2021, 2022, 2023, 2024], 85, 115, &mut log);

            assert_eq!(path.len(), 5);
            assert!(path.windows(2).all(|w| w[0] <= w[1]), "seed {}: {:?}", seed, path);
            assert!(path.iter().all(|&c| (85..=115).contains(&c)));
        }
    }

    #[test]
    fn test_degenerate_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut log = DrawLog::default();
        let path = exposure_path(&mut rng, &[2020, 2021, 2022], 100, 100, &mut log);
        assert_eq!(path, vec![100, 100, 100]);
        assert_eq!(log.into_records().len(), 3);
    }
}
