//! Display ordering: a fixed leading block followed by randomly interleaved samples.

use rand::Rng;

/// First original position of the leading block (0-based).
pub const PRIORITY_START: usize = 59;
/// One past the last original position of the leading block.
pub const PRIORITY_END: usize = 75;
/// Scattered samples are never inserted before this output position.
pub const MIN_SCATTER_POSITION: usize = PRIORITY_END - PRIORITY_START;

/// Reorder samples for display.
///
/// Original positions `[59, 75)` lead in their original order, followed by
/// positions `75..` in order. Positions `0..59` are shuffled and then inserted
/// one at a time at a uniform position in `[min(16, len), len]`, where `len`
/// grows with every insertion. The expanding insertion range is intentional
/// and skews placement; it is not equivalent to shuffling the suffix.
pub fn reorder<T, R: Rng + ?Sized>(items: Vec<T>, rng: &mut R) -> Vec<T> {
    let total = items.len();
    let mut scatter = Vec::with_capacity(total.min(PRIORITY_START));
    let mut output = Vec::with_capacity(total);
    let mut tail = Vec::with_capacity(total.saturating_sub(PRIORITY_END));
    for (index, item) in items.into_iter().enumerate() {
        if index < PRIORITY_START {
            scatter.push(item);
        } else if index < PRIORITY_END {
            output.push(item);
        } else {
            tail.push(item);
        }
    }
    output.extend(tail);

    shuffle(&mut scatter, rng);
    for item in scatter {
        let len = output.len();
        let floor = MIN_SCATTER_POSITION.min(len);
        let position = rng.random_range(floor..=len);
        output.insert(position, item);
    }
    output
}

/// Fisher-Yates, walking from the last index down to 1.
fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted(mut values: Vec<usize>) -> Vec<usize> {
        values.sort_unstable();
        values
    }

    #[test]
    fn output_is_permutation_for_edge_lengths() {
        for len in [0usize, 1, 15, 16, 17, 58, 59, 60, 74, 75, 76, 400] {
            let mut rng = StdRng::seed_from_u64(len as u64);
            let input: Vec<usize> = (0..len).collect();
            let output = reorder(input.clone(), &mut rng);
            assert_eq!(output.len(), len);
            assert_eq!(sorted(output), input, "len {len}");
        }
    }

    #[test]
    fn leading_block_and_tail_keep_original_order() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let output = reorder((0..400).collect::<Vec<usize>>(), &mut rng);
            let expected_head: Vec<usize> = (59..75).collect();
            assert_eq!(&output[..16], expected_head.as_slice());

            let tail: Vec<usize> = output.iter().copied().filter(|&v| v >= 75).collect();
            assert_eq!(tail, (75..400).collect::<Vec<_>>());
        }
    }

    #[test]
    fn scattered_samples_never_precede_position_sixteen() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let output = reorder((0..120).collect::<Vec<usize>>(), &mut rng);
            for (position, value) in output.iter().enumerate() {
                if *value < PRIORITY_START {
                    assert!(position >= MIN_SCATTER_POSITION, "{value} at {position}");
                }
            }
        }
    }

    #[test]
    fn tail_directly_follows_leading_block_when_nothing_scattered_between() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<usize> = (0..75).collect();
        let output = reorder(input, &mut rng);
        assert_eq!(&output[..16], (59..75).collect::<Vec<_>>().as_slice());
        assert!(output[16..].iter().all(|&v| v < PRIORITY_START));
    }

    #[test]
    fn short_inputs_still_shuffle_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let output = reorder((0..10).collect::<Vec<usize>>(), &mut rng);
        assert_eq!(sorted(output), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        let a = reorder((0..200).collect::<Vec<usize>>(), &mut StdRng::seed_from_u64(11));
        let b = reorder((0..200).collect::<Vec<usize>>(), &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
