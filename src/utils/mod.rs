pub trait Standardize {
    /// Centers every column on zero and scales it to unit sample standard deviation.
    /// Constant columns are only centered.
    fn standardize(&mut self) -> anyhow::Result<()>;

    fn center(&mut self) -> anyhow::Result<()>;
}
