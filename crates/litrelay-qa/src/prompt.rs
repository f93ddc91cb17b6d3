//! Instruction template sent to the model.

/// The single table the model may query.
pub const ALLOWED_TABLE: &str = "articles";

/// Columns the model may reference, with their storage types.
pub const ALLOWED_COLUMNS: &str =
    "pmid (TEXT), title (TEXT), journal (TEXT), pubdate (TEXT), doi (TEXT)";

/// Build the fixed SQL-drafting prompt for a user question.
pub fn build_sql_prompt(question: &str) -> String {
    format!(
        "You are a careful SQL assistant. Translate the user's request into a \
single safe SQL SELECT query.\n\
\n\
Rules:\n\
- Target table: {ALLOWED_TABLE}\n\
- Allowed columns: {ALLOWED_COLUMNS}\n\
- You may compute year from pubdate using SUBSTR(pubdate, 1, 4) AS year\n\
- Use LIKE with wildcards for text filters.\n\
- Never modify data; only SELECT. No semicolons.\n\
- Always include a LIMIT, e.g., LIMIT 100.\n\
\n\
User question:\n\
{question}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_table_and_question() {
        let p = build_sql_prompt("papers about sepsis from 2020");
        assert!(p.contains("Target table: articles"));
        assert!(p.contains("papers about sepsis from 2020"));
        assert!(p.contains("LIMIT"));
        assert!(p.contains("No semicolons"));
    }
}
