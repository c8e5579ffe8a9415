use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Randomizes display order. Seeded runs are reproducible.
pub struct Shuffler {
    rng: StdRng,
}

impl Shuffler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }

    pub fn shuffle<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        if items.len() > 1 {
            items.shuffle(&mut self.rng);
        }
        items
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_permutation() {
        let input: Vec<u32> = (0..50).collect();
        let mut output = Shuffler::seeded(7).shuffle(input.clone());

        assert_eq!(output.len(), input.len());
        output.sort_unstable();
        assert_eq!(output, input);
    }

    #[test]
    fn test_same_seed_same_order() {
        let input: Vec<u32> = (0..20).collect();
        let first = Shuffler::seeded(42).shuffle(input.clone());
        let second = Shuffler::seeded(42).shuffle(input.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_changes_order_for_large_input() {
        let input: Vec<u32> = (0..100).collect();
        let output = Shuffler::seeded(1).shuffle(input.clone());
        assert_ne!(output, input);
    }

    #[test]
    fn test_empty_and_single_are_identity() {
        let mut shuffler = Shuffler::default();
        assert_eq!(shuffler.shuffle(Vec::<u32>::new()), Vec::<u32>::new());
        assert_eq!(shuffler.shuffle(vec!["only"]), vec!["only"]);
    }
}
