//! Expression-string assembly.
//!
//! The renderer joins the four clause-text lists under their category
//! keywords. Clauses within a category are comma-separated; categories are
//! space-separated with no punctuation between them; a category whose list
//! is empty is omitted entirely. All validation happens before this point.

/// Render the final update-expression string.
///
/// Category order is fixed (`SET`, `ADD`, `REMOVE`, `DELETE`) so identical
/// input always renders byte-identical output.
#[must_use]
pub fn render(
    set_clauses: &[String],
    add_clauses: &[String],
    remove_clauses: &[String],
    delete_clauses: &[String],
) -> String {
    let mut out = String::new();
    push_category(&mut out, "SET", set_clauses);
    push_category(&mut out, "ADD", add_clauses);
    push_category(&mut out, "REMOVE", remove_clauses);
    push_category(&mut out, "DELETE", delete_clauses);
    out
}

fn push_category(out: &mut String, keyword: &str, clauses: &[String]) {
    if clauses.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(keyword);
    out.push(' ');
    out.push_str(&clauses.join(", "));
}
