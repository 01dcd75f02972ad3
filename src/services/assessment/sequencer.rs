use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::domain::Question;

/// Replaces every id with `q<position>`, counting from 1.
pub fn resequence(mut questions: Vec<Question>) -> Vec<Question> {
    for (index, question) in questions.iter_mut().enumerate() {
        question.id = format!("q{}", index + 1);
    }
    questions
}

pub fn shuffle_and_resequence<R: Rng + ?Sized>(
    mut questions: Vec<Question>,
    rng: &mut R,
) -> Vec<Question> {
    questions.shuffle(rng);
    resequence(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numbered(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                id: format!("orig-{i}"),
                prompt: format!("Prompt {i}"),
                options: Vec::new(),
                scenario: None,
                tags: None,
            })
            .collect()
    }

    #[test]
    fn ids_follow_final_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = shuffle_and_resequence(numbered(10), &mut rng);

        for (k, question) in shuffled.iter().enumerate() {
            assert_eq!(question.id, format!("q{}", k + 1));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let shuffled = shuffle_and_resequence(numbered(10), &mut rng);

        let mut prompts: Vec<String> = shuffled.into_iter().map(|q| q.prompt).collect();
        prompts.sort();
        let mut expected: Vec<String> = numbered(10).into_iter().map(|q| q.prompt).collect();
        expected.sort();
        assert_eq!(prompts, expected);
    }

    #[test]
    fn same_seed_same_order() {
        let first = shuffle_and_resequence(numbered(8), &mut StdRng::seed_from_u64(3));
        let second = shuffle_and_resequence(numbered(8), &mut StdRng::seed_from_u64(3));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_is_fine() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle_and_resequence(Vec::new(), &mut rng).is_empty());
    }
}
