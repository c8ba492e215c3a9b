use rand::Rng;
use rand::seq::SliceRandom;

/// Merge the correct answer into the distractors and shuffle.
///
/// Returns the options and the index the correct answer ended up at. The
/// index is tracked through the shuffle, so duplicate option texts cannot
/// confuse it.
pub fn assemble_options<R: Rng + ?Sized>(
    correct: String,
    incorrect: Vec<String>,
    rng: &mut R,
) -> (Vec<String>, usize) {
    let mut tagged: Vec<(bool, String)> = incorrect.into_iter().map(|text| (false, text)).collect();
    tagged.push((true, correct));
    tagged.shuffle(rng);

    let correct_index = tagged
        .iter()
        .position(|(is_correct, _)| *is_correct)
        .unwrap_or_default();
    let options = tagged.into_iter().map(|(_, text)| text).collect();
    (options, correct_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn correct_index_points_at_correct_text() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (options, index) =
                assemble_options("Paris".into(), strings(&["London", "Berlin", "Madrid"]), &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(options[index], "Paris");
        }
    }

    #[test]
    fn same_seed_gives_same_order() {
        let a = assemble_options(
            "Au".into(),
            strings(&["Go", "Gd", "Ag"]),
            &mut StdRng::seed_from_u64(7),
        );
        let b = assemble_options(
            "Au".into(),
            strings(&["Go", "Gd", "Ag"]),
            &mut StdRng::seed_from_u64(7),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_reaches_every_position() {
        let mut seen = [false; 4];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, index) = assemble_options("c".into(), strings(&["a", "b", "d"]), &mut rng);
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn duplicate_texts_keep_the_real_correct_index() {
        let mut rng = StdRng::seed_from_u64(3);
        let (options, index) = assemble_options("same".into(), strings(&["same", "other"]), &mut rng);
        assert_eq!(options[index], "same");
        assert_eq!(options.len(), 3);
    }
}
