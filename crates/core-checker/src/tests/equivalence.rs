use crate::{ComparisonPolicy, ResultSet, Row, Value, compare, evaluate};

fn users(rows: &[(i64, &str)]) -> ResultSet {
    ResultSet::new(
        vec!["id".to_string(), "name".to_string()],
        rows.iter()
            .map(|(id, name)| Row::new().with("id", *id).with("name", *name))
            .collect(),
    )
}

fn reordered_users(rows: &[(i64, &str)]) -> ResultSet {
    ResultSet::new(
        vec!["name".to_string(), "id".to_string()],
        rows.iter()
            .map(|(id, name)| Row::new().with("name", *name).with("id", *id))
            .collect(),
    )
}

const ROWS: [(i64, &str); 3] = [(1, "Alice"), (2, "Bob"), (3, "Carol")];

#[test]
fn any_permutation_matches_without_ordering_clause() {
    let reference = users(&ROWS);
    let permutations = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    for order in permutations {
        let rows: Vec<_> = order.iter().map(|i| ROWS[*i]).collect();
        let outcome = compare(&users(&rows), &reference, "SELECT id, name FROM users");
        assert!(outcome.is_equivalent, "{order:?}");
    }
}

#[test]
fn row_order_matters_with_ordering_clause() {
    let reference = users(&ROWS);
    let student = users(&[ROWS[2], ROWS[0], ROWS[1]]);
    let query = "SELECT id, name FROM users ORDER BY id";
    assert!(!compare(&student, &reference, query).is_equivalent);
    assert!(compare(&users(&ROWS), &reference, query).is_equivalent);
}

#[test]
fn column_order_mismatch_fails() {
    let outcome = compare(
        &reordered_users(&ROWS),
        &users(&ROWS),
        "SELECT id, name FROM users",
    );
    assert!(!outcome.is_equivalent);
}

#[test]
fn row_count_mismatch_fails() {
    let outcome = evaluate(
        &users(&ROWS[..2]),
        &users(&ROWS),
        ComparisonPolicy::unordered(),
    );
    assert!(!outcome.is_equivalent);
}

#[test]
fn duplicated_rows_are_compared_as_multisets() {
    let reference = users(&[ROWS[0], ROWS[0], ROWS[1]]);
    let student = users(&[ROWS[0], ROWS[1], ROWS[1]]);
    assert!(!evaluate(&student, &reference, ComparisonPolicy::unordered()).is_equivalent);
}

#[test]
fn value_mismatch_fails() {
    let student = users(&[(1, "Alice"), (2, "Bobby"), (3, "Carol")]);
    assert!(!evaluate(&student, &users(&ROWS), ComparisonPolicy::unordered()).is_equivalent);
}

#[test]
fn empty_result_sets_with_same_fields_match() {
    let outcome = evaluate(&users(&[]), &users(&[]), ComparisonPolicy::ordered());
    assert!(outcome.is_equivalent);
}

#[test]
fn numeric_representations_are_equivalent() {
    let fields = vec!["total".to_string()];
    let student = ResultSet::new(fields.clone(), vec![Row::new().with("total", 100)]);
    let reference = ResultSet::new(
        fields,
        vec![Row::new().with("total", Value::Decimal("100.00".to_string()))],
    );
    assert!(evaluate(&student, &reference, ComparisonPolicy::ordered()).is_equivalent);
}

#[test]
fn inputs_are_not_mutated() {
    let student = users(&[ROWS[2], ROWS[1], ROWS[0]]);
    let reference = users(&ROWS);
    let before = (student.clone(), reference.clone());
    let _ = evaluate(&student, &reference, ComparisonPolicy::unordered());
    assert_eq!((student, reference), before);
}
