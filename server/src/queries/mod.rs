//! Data-access functions. Every function takes the connection or transaction
//! it runs on; writes open their own transaction and commit it only when
//! every statement succeeded.

pub mod artists;
pub mod genres;
pub mod shows;
pub mod venues;

use sea_orm::{DbErr, TransactionError};
use serde::Serialize;
use thiserror::Error;

use entity::RecordKind;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("{0} {1} not found")]
    NotFound(RecordKind, i32),

    #[error("{0} {1} does not exist")]
    MissingReference(RecordKind, i32),
}

impl From<TransactionError<QueryError>> for QueryError {
    fn from(value: TransactionError<QueryError>) -> Self {
        match value {
            TransactionError::Connection(e) => QueryError::DbErr(e),
            TransactionError::Transaction(e) => e,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for SearchResults<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Case-insensitive substring match. Both sides get the same Unicode
/// folding, SQLite's `lower()` only folds ASCII.
fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}
