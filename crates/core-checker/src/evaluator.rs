use crate::normalizer::canonical_row;
use crate::policy::ComparisonPolicy;
use crate::result_set::ResultSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOutcome {
    pub is_equivalent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mismatch {
    Fields,
    RowCount { student: usize, reference: usize },
    Row { position: usize },
}

/// Decides whether the student's result set is the same answer as the reference one.
#[must_use]
pub fn evaluate(
    student: &ResultSet,
    reference: &ResultSet,
    policy: ComparisonPolicy,
) -> ComparisonOutcome {
    let mismatch = find_mismatch(student, reference, policy);
    if let Some(mismatch) = &mismatch {
        tracing::debug!(?mismatch, ?policy, "result sets differ");
    }
    ComparisonOutcome {
        is_equivalent: mismatch.is_none(),
    }
}

/// Derives the policy from the reference query text, then evaluates.
#[must_use]
pub fn compare(student: &ResultSet, reference: &ResultSet, reference_query: &str) -> ComparisonOutcome {
    evaluate(
        student,
        reference,
        ComparisonPolicy::from_reference_query(reference_query),
    )
}

fn find_mismatch(
    student: &ResultSet,
    reference: &ResultSet,
    policy: ComparisonPolicy,
) -> Option<Mismatch> {
    if student.fields != reference.fields {
        return Some(Mismatch::Fields);
    }
    if student.row_count() != reference.row_count() {
        return Some(Mismatch::RowCount {
            student: student.row_count(),
            reference: reference.row_count(),
        });
    }

    let mut student_rows: Vec<String> = student.rows.iter().map(canonical_row).collect();
    let mut reference_rows: Vec<String> = reference.rows.iter().map(canonical_row).collect();
    if !policy.order_sensitive {
        student_rows.sort_unstable();
        reference_rows.sort_unstable();
    }

    student_rows
        .iter()
        .zip(&reference_rows)
        .position(|(s, r)| s != r)
        .map(|position| Mismatch::Row { position })
}
