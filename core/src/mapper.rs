/// Pluggable map contract: one task payload in, an ordered sequence of
/// (key, value) emissions out. Implementations must be pure - no I/O, no
/// shared mutation - and must not block; the engine calls them synchronously
/// inside the worker loop.
pub trait Mapper: Send + Sync + 'static {
    fn map(&self, input: &str) -> Vec<(String, i64)>;
}

impl<F> Mapper for F
where
    F: Fn(&str) -> Vec<(String, i64)> + Send + Sync + 'static,
{
    fn map(&self, input: &str) -> Vec<(String, i64)> {
        (self)(input)
    }
}
