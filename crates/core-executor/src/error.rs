use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExecutionError {
    // message is surfaced to the learner as is
    #[snafu(display("{message}"))]
    Query { message: String },

    #[snafu(display("Query exceeded the time limit of {timeout_ms} ms"))]
    Timeout { timeout_ms: u128 },

    #[snafu(display("Unsupported type {type_name} of column {column}"))]
    UnsupportedType { column: String, type_name: String },

    #[snafu(display("Duplicate column name {column} in result"))]
    DuplicateColumn { column: String },

    #[snafu(display("Cannot read value of column {column}: {source}"))]
    Decode { column: String, source: sqlx::Error },

    #[snafu(display("Database connection error: {source}"))]
    Connection { source: sqlx::Error },
}

impl ExecutionError {
    /// Query error carrying the database's own message when there is one.
    #[must_use]
    pub fn from_query(err: &sqlx::Error) -> Self {
        let message = err
            .as_database_error()
            .map_or_else(|| err.to_string(), |db_err| db_err.message().to_string());
        Self::Query { message }
    }
}

pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
