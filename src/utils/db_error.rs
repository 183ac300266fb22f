/// Returns the constraint name when `e` is a unique violation reported by the store.
///
/// Violations without a constraint name yield `Some("")`.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<&str> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint().unwrap_or_default())
}
