use linereduce_core::{Mapper, Reducer};

/// The reference map/reduce instance: whitespace-separated word counting with
/// summation. Any other pure pair of functions satisfying the engine's
/// contracts can replace it.
pub struct WordCount;

impl Mapper for WordCount {
    /// Splits on whitespace, lowercases, and pre-aggregates counts within
    /// the line so each word is emitted once, in first-occurrence order.
    fn map(&self, input: &str) -> Vec<(String, i64)> {
        let mut counts: Vec<(String, i64)> = Vec::new();
        for word in input.split_whitespace() {
            let word = word.to_lowercase();
            match counts.iter_mut().find(|(w, _)| *w == word) {
                Some((_, n)) => *n += 1,
                None => counts.push((word, 1)),
            }
        }
        counts
    }
}

impl Reducer for WordCount {
    /// Sums all per-line counts for a word. Commutative and associative, so
    /// the final result is independent of worker completion order.
    fn reduce(&self, _key: &str, values: &[i64]) -> i64 {
        values.iter().sum()
    }
}
