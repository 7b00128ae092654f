//! Loading of practice assignments from a YAML file at startup.

use chrono::Utc;
use core_history::errors::HistoryStoreError;
use core_history::{Assignment, AssignmentId, AssignmentStore, Difficulty, SourceTable};
use serde::Deserialize;
use snafu::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum SeedError {
    #[snafu(display("Error reading assignments file {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Error loading assignments: {source}"))]
    LoadSeed { source: serde_yaml::Error },

    #[snafu(display("Error storing assignment {id}: {source}"))]
    Store {
        id: AssignmentId,
        source: HistoryStoreError,
    },
}

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug, Deserialize)]
struct SeedRoot {
    assignments: Vec<AssignmentSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentSeed {
    id: AssignmentId,
    title: String,
    #[serde(default)]
    description: String,
    difficulty: Difficulty,
    solution_query: String,
    #[serde(default)]
    source_tables: Vec<SourceTable>,
    #[serde(default)]
    expected_result_schema: Vec<String>,
}

impl From<AssignmentSeed> for Assignment {
    fn from(seed: AssignmentSeed) -> Self {
        Self {
            id: seed.id,
            title: seed.title,
            description: seed.description,
            difficulty: seed.difficulty,
            solution_query: seed.solution_query,
            source_tables: seed.source_tables,
            expected_result_schema: seed.expected_result_schema,
            created_at: Utc::now(),
        }
    }
}

pub fn parse_assignments(yaml: &str) -> SeedResult<Vec<Assignment>> {
    let root: SeedRoot = serde_yaml::from_str(yaml).context(LoadSeedSnafu)?;
    Ok(root.assignments.into_iter().map(Assignment::from).collect())
}

/// Stores assignments whose id is not known yet, returns how many were added.
pub async fn seed_assignments(
    store: &dyn AssignmentStore,
    assignments: Vec<Assignment>,
) -> SeedResult<usize> {
    let mut added = 0;
    for assignment in assignments {
        let id = assignment.id;
        match store.get_assignment(id).await {
            Ok(_) => tracing::debug!(%id, "Assignment already present"),
            Err(HistoryStoreError::AssignmentNotFound { .. }) => {
                store
                    .add_assignment(assignment)
                    .await
                    .context(StoreSnafu { id })?;
                added += 1;
            }
            Err(source) => return Err(SeedError::Store { id, source }),
        }
    }
    Ok(added)
}

pub async fn seed_from_file(store: &dyn AssignmentStore, path: &Path) -> SeedResult<usize> {
    let yaml = tokio::fs::read_to_string(path)
        .await
        .context(ReadFileSnafu { path })?;
    seed_assignments(store, parse_assignments(&yaml)?).await
}
