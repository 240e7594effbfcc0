/// Pluggable reduce contract: folds every value emitted under one key into a
/// single value. Implementations must be pure. Completion order across
/// workers is non-deterministic, so a reducer that depends on value order
/// must document that it accepts non-deterministic output; the engine only
/// guarantees a stable result for commutative/associative folds.
pub trait Reducer: Send + Sync + 'static {
    fn reduce(&self, key: &str, values: &[i64]) -> i64;
}

impl<F> Reducer for F
where
    F: Fn(&str, &[i64]) -> i64 + Send + Sync + 'static,
{
    fn reduce(&self, key: &str, values: &[i64]) -> i64 {
        (self)(key, values)
    }
}
