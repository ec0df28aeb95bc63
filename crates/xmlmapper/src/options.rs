/// What to do when the running `Score` sum would leave the `i32` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Stop at the overflowing element and keep the partial sum
    #[default]
    Truncate,
    /// Fail the whole conversion
    Fail,
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Indentation size of the JSON output (default: 4 spaces, 0 = compact)
    pub indent: usize,
    pub overflow: OverflowPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: 4,
            overflow: OverflowPolicy::Truncate,
        }
    }
}
