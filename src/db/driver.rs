//! The Postgres-facing seam of the storage layer: list-query construction
//! and backend error classification. The canonical get/create/update/remove
//! templates live on each resource descriptor; only the filtered list query
//! is assembled at runtime.

use crate::models::types::Pagination;
use std::fmt::Display;
use tokio_postgres::error::SqlState;

/// Builds a filtered list query from a base `SELECT ... FROM <table>`.
///
/// Predicates are conjoined in the order they are added: the first present
/// one opens the `WHERE` clause, later ones join with `AND`. Absent values
/// add nothing. Pagination goes last, `LIMIT` before `OFFSET`, each omitted
/// when zero. Values are embedded as quoted literals; everything that flows
/// in here is a UUID already parsed upstream.
pub struct ListQuery {
    sql: String,
    has_where: bool,
}

impl ListQuery {
    pub fn new(base: &str) -> Self {
        Self {
            sql: base.to_string(),
            has_where: false,
        }
    }

    pub fn filter<T: Display>(mut self, column: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.sql.push_str(if self.has_where { " AND " } else { " WHERE " });
            self.sql.push_str(&format!("{column} = '{v}'"));
            self.has_where = true;
        }
        self
    }

    pub fn paginate(mut self, p: Pagination) -> Self {
        if p.limit > 0 {
            self.sql.push_str(&format!(" LIMIT {}", p.limit));
        }
        if p.offset > 0 {
            self.sql.push_str(&format!(" OFFSET {}", p.offset));
        }
        self
    }

    pub fn build(self) -> String {
        self.sql
    }
}

/// True when the backend rejected a write because a referenced row does not
/// exist (SQLSTATE 23503).
pub fn is_foreign_key_violation(err: &tokio_postgres::Error) -> bool {
    err.as_db_error()
        .is_some_and(|db| db.code() == &SqlState::FOREIGN_KEY_VIOLATION)
}

/// True when the backend rejected a write because of a uniqueness conflict
/// (SQLSTATE 23505).
pub fn is_unique_violation(err: &tokio_postgres::Error) -> bool {
    err.as_db_error()
        .is_some_and(|db| db.code() == &SqlState::UNIQUE_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn t_no_filters_is_bare_query() {
        let q = ListQuery::new("SELECT id FROM rooms")
            .paginate(Pagination::default())
            .build();
        assert_eq!(q, "SELECT id FROM rooms");
    }

    #[test]
    fn t_first_filter_opens_where() {
        let id = Uuid::new_v4();
        let q = ListQuery::new("SELECT id FROM rooms")
            .filter("owner_id", Some(id))
            .paginate(Pagination::default())
            .build();
        assert_eq!(q, format!("SELECT id FROM rooms WHERE owner_id = '{id}'"));
    }

    #[test]
    fn t_later_filters_join_with_and() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let q = ListQuery::new("SELECT id FROM rooms")
            .filter("owner_id", Some(a))
            .filter("missing", None::<Uuid>)
            .filter("parent_id", Some(b))
            .build();
        assert_eq!(
            q,
            format!("SELECT id FROM rooms WHERE owner_id = '{a}' AND parent_id = '{b}'")
        );
    }

    #[test]
    fn t_limit_before_offset() {
        let q = ListQuery::new("SELECT id FROM rooms")
            .paginate(Pagination::new(10, 5))
            .build();
        assert_eq!(q, "SELECT id FROM rooms LIMIT 10 OFFSET 5");
    }

    #[test]
    fn t_offset_without_limit() {
        let q = ListQuery::new("SELECT id FROM rooms")
            .paginate(Pagination::new(0, 5))
            .build();
        assert_eq!(q, "SELECT id FROM rooms OFFSET 5");
    }
}
