use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

use super::view::{Flash, View};
use crate::{forms::ValidationErrors, queries::QueryError};
use entity::RecordKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("{0} {1} not found")]
    NotFound(RecordKind, i32),
    #[error("Page not found")]
    PageNotFound,

    #[error("Invalid form submission, {0}")]
    Validation(ValidationErrors),
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    Persistence { message: String, source: DbErr },
    #[error("{0} <ID: {1}> does not exist")]
    Reference(RecordKind, i32, String),
}

impl Error {
    /// Maps the failure of a write. Database errors become a bad request
    /// carrying `message` as the flash.
    pub fn write(err: QueryError, message: String) -> Self {
        match err {
            QueryError::DbErr(source) => Error::Persistence { message, source },
            QueryError::NotFound(kind, id) => Error::NotFound(kind, id),
            QueryError::MissingReference(kind, id) => Error::Reference(kind, id, message),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::DbErr(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound(..) | Error::PageNotFound => StatusCode::NOT_FOUND,
            Error::Validation(_)
            | Error::BadRequest(_)
            | Error::Persistence { .. }
            | Error::Reference(..) => StatusCode::BAD_REQUEST,
        }
    }

    fn messages(&self) -> Vec<Flash> {
        match self {
            Error::BadRequest(m) | Error::Persistence { message: m, .. } => {
                vec![Flash::error(m.to_owned())]
            }
            Error::Reference(_, _, m) => {
                vec![Flash::error(self.to_string()), Flash::error(m.to_owned())]
            }
            _ => Vec::new(),
        }
    }
}

impl From<QueryError> for Error {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::DbErr(e) => Error::DbErr(e),
            QueryError::NotFound(kind, id) => Error::NotFound(kind, id),
            e @ QueryError::MissingReference(kind, id) => {
                Error::Reference(kind, id, e.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Error::Validation(value)
    }
}

#[derive(Serialize)]
struct ErrorData {
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Error::DbErr(e) => tracing::error!(%e, "Could not read from the database"),
            Error::Persistence { message, source } => {
                tracing::error!(%source, flash = %message, "Could not write to the database")
            }
            Error::NotFound(..) | Error::PageNotFound => tracing::debug!(error = %self),
            _ => tracing::info!(error = %self, "Rejected request"),
        }
        let template = match status {
            StatusCode::NOT_FOUND => "errors/404.html",
            StatusCode::BAD_REQUEST => "errors/400.html",
            _ => "errors/500.html",
        };
        let mut view = View::new(
            template,
            ErrorData {
                status: status.as_u16(),
                errors: None,
            },
        );
        view.messages = self.messages();
        if let Error::Validation(errors) = self {
            view.data.errors = Some(errors);
        }
        (status, view).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failures_are_bad_requests() {
        let err = Error::write(
            QueryError::DbErr(DbErr::Custom("constraint".to_string())),
            "An error occurred. Venue \"X\" could not be listed.".to_string(),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.messages(),
            vec![Flash::error("An error occurred. Venue \"X\" could not be listed.")]
        );
    }

    #[test]
    fn read_failures_are_server_errors() {
        let err: Error = QueryError::DbErr(DbErr::Custom("gone".to_string())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: Error = QueryError::NotFound(RecordKind::Artist, 4).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_reference_names_the_record() {
        let err = Error::write(
            QueryError::MissingReference(RecordKind::Venue, 9),
            "An error occurred. Show could not be listed.".to_string(),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.messages()[0].message, "Venue <ID: 9> does not exist");
    }
}
