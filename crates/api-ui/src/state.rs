use crate::config::{AuthConfig, WebConfig};
use core_executor::{QueryExecutor, SubmissionService};
use core_hints::HintService;
use core_history::{AssignmentStore, AttemptStore};
use std::sync::Arc;

// Define a State struct that contains shared services or repositories
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<dyn QueryExecutor>,
    pub submissions: Arc<SubmissionService>,
    pub assignments: Arc<dyn AssignmentStore>,
    pub attempts: Arc<dyn AttemptStore>,
    pub hints: Arc<dyn HintService>,
    pub preview_row_limit: u32,
    pub config: Arc<WebConfig>,
    // separate non printable AuthConfig
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        assignments: Arc<dyn AssignmentStore>,
        attempts: Arc<dyn AttemptStore>,
        hints: Arc<dyn HintService>,
        preview_row_limit: u32,
        config: Arc<WebConfig>,
        auth_config: Arc<AuthConfig>,
    ) -> Self {
        let submissions = Arc::new(SubmissionService::new(
            executor.clone(),
            assignments.clone(),
            attempts.clone(),
        ));
        Self {
            executor,
            submissions,
            assignments,
            attempts,
            hints,
            preview_row_limit,
            config,
            auth_config,
        }
    }
}
