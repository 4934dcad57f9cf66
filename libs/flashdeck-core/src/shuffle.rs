//! Session ordering.

use rand::Rng;

/// Return a uniformly random permutation of `items`.
///
/// Backward Fisher–Yates over a copy: for `i` from the last index down to 1,
/// swap slot `i` with a slot drawn uniformly from `0..=i`. The input is not
/// touched.
pub fn shuffle_array<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    #[test]
    fn result_is_a_permutation_of_the_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let input: Vec<u32> = (0..50).collect();

        let shuffled = shuffle_array(&input, &mut rng);
        assert_eq!(shuffled.len(), input.len());
        assert_ne!(shuffled, input);

        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
        // caller's slice is untouched
        assert_eq!(input, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn duplicates_are_preserved() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let input = vec!["a", "b", "a", "c", "a"];
        let mut shuffled = shuffle_array(&input, &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec!["a", "a", "a", "b", "c"]);
    }

    #[test]
    fn empty_and_single_inputs_come_back_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(shuffle_array::<u8, _>(&[], &mut rng), Vec::<u8>::new());
        assert_eq!(shuffle_array(&["only"], &mut rng), vec!["only"]);
    }

    #[test]
    fn swaps_walk_from_the_back() {
        // an all-zero source always picks index 0
        let mut rng = StepRng::new(0, 0);
        let shuffled = shuffle_array(&['a', 'b', 'c', 'd'], &mut rng);
        assert_eq!(shuffled, vec!['b', 'c', 'd', 'a']);
    }

    #[test]
    fn every_ordering_is_about_equally_likely() {
        const TRIALS: usize = 60_000;
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let input = [1u8, 2, 3];

        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..TRIALS {
            *counts.entry(shuffle_array(&input, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = TRIALS / 6;
        for (ordering, count) in &counts {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 10,
                "{ordering:?} appeared {count} times, expected about {expected}"
            );
        }
    }
}
