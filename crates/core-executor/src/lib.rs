pub mod config;
pub mod convert;
pub mod error;
pub mod executor;
pub mod guard;
pub mod service;


pub use config::ExecutorConfig;
pub use error::{ExecutionError, ExecutionResult};
pub use executor::{PgQueryExecutor, QueryExecutor, ReferenceRun, SubmissionRun};
pub use guard::{GuardError, TableName, ValidatedQuery};
pub use service::{Submission, SubmissionError, SubmissionOutcome, SubmissionService};
