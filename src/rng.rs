use crate::canvas::Coord;

/// SplitMix64 with the standard constants.
///
/// The star layout is required to be reproducible across runs and platforms
/// for a given seed, so the generator is fixed here rather than delegated to
/// a PRNG crate whose stream may change between versions.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-enough value in `[0, bound)`. Plain modulo: the bias is far
    /// below anything observable at canvas sizes, and the reduction must stay
    /// fixed because shuffle order is part of the output contract.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        self.next_u64() % bound
    }
}

/// All canvas coordinates in a seed-determined order.
///
/// Row-major enumeration followed by a Fisher-Yates shuffle. Visiting
/// candidates in shuffled order (rather than row-major) is what prevents the
/// grid- and ring-shaped artifacts the proximity filter would otherwise
/// produce around earlier placements.
pub fn shuffled_coords(width: u32, height: u32, seed: u64) -> Vec<Coord> {
    let mut coords = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            coords.push(Coord::new(x, y));
        }
    }

    let mut rng = SplitMix64::new(seed);
    for i in (1..coords.len()).rev() {
        let j = rng.next_below(i as u64 + 1) as usize;
        coords.swap(i, j);
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix64_matches_reference_vector() {
        // First three outputs for seed 0, from the reference implementation.
        let mut rng = SplitMix64::new(0);
        assert_eq!(rng.next_u64(), 0xE220_A839_7B1D_CDAF);
        assert_eq!(rng.next_u64(), 0x6E78_9E6A_A1B9_65F4);
        assert_eq!(rng.next_u64(), 0x06C4_5D18_8009_454F);
    }

    #[test]
    fn next_below_stays_in_range() {
        let mut rng = SplitMix64::new(42);
        for _ in 0..1000 {
            assert!(rng.next_below(7) < 7);
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut coords = shuffled_coords(13, 7, 1);
        coords.sort_by_key(|c| (c.y, c.x));
        let mut expected = Vec::new();
        for y in 0..7 {
            for x in 0..13 {
                expected.push(Coord::new(x, y));
            }
        }
        assert_eq!(coords, expected);
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        assert_eq!(shuffled_coords(16, 16, 1), shuffled_coords(16, 16, 1));
    }

    #[test]
    fn different_seeds_give_different_orders() {
        assert_ne!(shuffled_coords(16, 16, 1), shuffled_coords(16, 16, 2));
    }

    #[test]
    fn single_pixel_canvas_shuffles_to_itself() {
        assert_eq!(shuffled_coords(1, 1, 9), vec![Coord::new(0, 0)]);
    }
}
