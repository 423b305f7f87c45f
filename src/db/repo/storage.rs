//! The generic CRUD engine. One `Storage<R>` instance per resource kind,
//! parameterized by a [`ResourceDef`] descriptor instead of four hand-copied
//! repository types.

use crate::db::{Db, DbResult, driver};
use crate::error::{AppResult, DomainError};
use postgres_types::ToSql;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_postgres::Row;

/// Per-resource descriptor consumed by [`Storage`]: the canonical query
/// templates, filter-to-SQL construction, row mapping, bind-parameter
/// packing, and the strings that end up in error messages.
pub trait ResourceDef: Send + Sync + 'static {
    /// Lowercase resource kind, used in log entries and error messages.
    const KIND: &'static str;

    type Id: ToSql + Send + Sync + Copy + Display + 'static;
    type Record: Send;
    type Request: Send + Sync;
    type Filter: Send + Sync;

    const GET_QUERY: &'static str;
    const CREATE_QUERY: &'static str;
    const UPDATE_QUERY: &'static str;
    const REMOVE_QUERY: &'static str;

    fn list_query(filter: &Self::Filter) -> String;

    fn from_row(row: &Row) -> DbResult<Self::Record>;

    /// Bind parameters for `CREATE_QUERY`, in column order. `UPDATE_QUERY`
    /// takes the same parameters with the row id appended last.
    fn params(req: &Self::Request) -> Vec<Box<dyn ToSql + Sync + Send>>;

    /// Local field validation, run before any backend call.
    fn validate(req: &Self::Request) -> AppResult<()>;

    /// Names the identifiers implicated in a foreign-key violation.
    fn reference_detail(req: &Self::Request) -> String;

    /// The name submitted with the request, for uniqueness messages.
    fn request_name(req: &Self::Request) -> &str;
}

pub struct Storage<R: ResourceDef> {
    db: Arc<Db>,
    _resource: PhantomData<R>,
}

impl<R: ResourceDef> Storage<R> {
    pub fn new(db: Arc<Db>) -> Self {
        Self {
            db,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self, filter: &R::Filter) -> AppResult<Vec<R::Record>> {
        tracing::info!(kind = R::KIND, "list");

        let client = self.db.get_client().await?;
        let query = R::list_query(filter);
        let rows = client
            .query(query.as_str(), &[])
            .await
            .map_err(|e| internal("list", R::KIND, &e))?;

        // A single undecodable row discards the whole result set.
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let record = R::from_row(row).map_err(|e| {
                tracing::error!(kind = R::KIND, error = %e, "row decode failed");
                internal("list", R::KIND, &e)
            })?;
            records.push(record);
        }

        Ok(records)
    }

    pub async fn get(&self, id: R::Id) -> AppResult<R::Record> {
        tracing::info!(kind = R::KIND, %id, "get");

        let client = self.db.get_client().await?;
        let row = client
            .query_opt(R::GET_QUERY, &[&id])
            .await
            .map_err(|e| internal("get", R::KIND, &e))?;

        match row {
            Some(row) => R::from_row(&row).map_err(|e| internal("get", R::KIND, &e)),
            None => Err(not_found("get", R::KIND)),
        }
    }

    pub async fn create(&self, req: &R::Request) -> AppResult<R::Record> {
        tracing::info!(kind = R::KIND, name = R::request_name(req), "create");

        R::validate(req)?;

        let client = self.db.get_client().await?;
        let params = R::params(req);
        let refs = param_refs(&params);

        match client.query_one(R::CREATE_QUERY, &refs).await {
            Ok(row) => R::from_row(&row).map_err(|e| internal("create", R::KIND, &e)),
            Err(e) => Err(classify_write::<R>("create", req, e)),
        }
    }

    pub async fn update(&self, id: R::Id, req: &R::Request) -> AppResult<R::Record> {
        tracing::info!(kind = R::KIND, %id, "update");

        R::validate(req)?;

        let client = self.db.get_client().await?;
        let mut params = R::params(req);
        params.push(Box::new(id));
        let refs = param_refs(&params);

        // Zero rows matched comes back as an empty result, distinct from any
        // constraint violation, so it classifies first.
        match client.query_opt(R::UPDATE_QUERY, &refs).await {
            Ok(Some(row)) => R::from_row(&row).map_err(|e| internal("update", R::KIND, &e)),
            Ok(None) => Err(not_found("update", R::KIND)),
            Err(e) => Err(classify_write::<R>("update", req, e)),
        }
    }

    pub async fn remove(&self, id: R::Id) -> AppResult<()> {
        tracing::info!(kind = R::KIND, %id, "remove");

        let client = self.db.get_client().await?;
        let affected = client
            .execute(R::REMOVE_QUERY, &[&id])
            .await
            .map_err(|e| internal("remove", R::KIND, &e))?;

        if affected == 0 {
            return Err(not_found("remove", R::KIND));
        }

        Ok(())
    }
}

fn param_refs(params: &[Box<dyn ToSql + Sync + Send>]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p.as_ref() as &(dyn ToSql + Sync)).collect()
}

fn internal(op: &str, kind: &str, err: &dyn Display) -> DomainError {
    DomainError::Internal(format!("failed to {op} {kind}: {err}"))
}

fn not_found(op: &str, kind: &str) -> DomainError {
    DomainError::NotFound(format!("failed to {op} {kind}: not found"))
}

/// Classifies a failed create/update: foreign-key violations first, then
/// uniqueness conflicts, then everything else as internal.
fn classify_write<R: ResourceDef>(op: &str, req: &R::Request, err: tokio_postgres::Error) -> DomainError {
    if driver::is_foreign_key_violation(&err) {
        DomainError::BadRequest(fk_message(op, R::KIND, &R::reference_detail(req)))
    } else if driver::is_unique_violation(&err) {
        DomainError::BadRequest(unique_message(R::KIND, R::request_name(req)))
    } else {
        internal(op, R::KIND, &err)
    }
}

fn fk_message(op: &str, kind: &str, detail: &str) -> String {
    format!("failed to {op} {kind}: {detail}")
}

fn unique_message(kind: &str, name: &str) -> String {
    format!("{kind} name '{name}' already exists")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_not_found_message_shape() {
        let err = not_found("get", "room");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "failed to get room: not found");

        assert_eq!(
            not_found("remove", "player").to_string(),
            "failed to remove player: not found"
        );
    }

    #[test]
    fn t_unique_message_shape() {
        assert_eq!(unique_message("room", "Nobody"), "room name 'Nobody' already exists");
    }

    #[test]
    fn t_fk_message_carries_detail() {
        let msg = fk_message(
            "create",
            "link",
            "ownerID 'a', locationID 'b', or destinationID 'c' does not exist",
        );
        assert_eq!(
            msg,
            "failed to create link: ownerID 'a', locationID 'b', or destinationID 'c' does not exist"
        );
    }
}
