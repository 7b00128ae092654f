use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Server side limit for each statement of a submission.
    pub statement_timeout: Duration,
    /// Rows returned by a table preview.
    pub preview_row_limit: u32,
}

impl ExecutorConfig {
    #[must_use]
    pub const fn new(statement_timeout: Duration, preview_row_limit: u32) -> Self {
        Self {
            statement_timeout,
            preview_row_limit,
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            statement_timeout: Duration::from_secs(5),
            preview_row_limit: 100,
        }
    }
}
