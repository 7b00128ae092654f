/// Tutor prompt asking for a conceptual hint without the final SQL.
#[must_use]
pub fn build_prompt(question: &str, query: Option<&str>) -> String {
    let query = query.map(str::trim).filter(|q| !q.is_empty()).unwrap_or("None");
    format!(
        "You are an SQL tutor. The student is solving the following problem:\n\
         \"{question}\"\n\n\
         The student's current query:\n\
         \"{query}\"\n\n\
         Provide a conceptual hint explaining what SQL concept is required \
         (e.g., JOIN, GROUP BY, HAVING) without giving the final SQL solution. \
         Do not include full query examples."
    )
}
