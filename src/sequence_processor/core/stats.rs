#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessingStats {
    /// Records handed to the processor so far
    pub processed: u64,
}
