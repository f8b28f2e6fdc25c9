//! Every page answers with a view model: the template that renders it, the
//! flash messages of the request and the data handed to the template.

use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

pub static HOME: &str = "pages/home.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn info<S: Into<String>>(message: S) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct View<T> {
    pub template: &'static str,
    pub messages: Vec<Flash>,
    pub data: T,
}

impl<T> View<T> {
    pub fn new(template: &'static str, data: T) -> Self {
        Self {
            template,
            messages: Vec::new(),
            data,
        }
    }

    pub fn flash(mut self, flash: Flash) -> Self {
        self.messages.push(flash);
        self
    }
}

impl<T> IntoResponse for View<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `303 See Other`. Without a session to carry it, the flash only ends up
/// in the logs.
pub fn redirect(location: &str, flash: Flash) -> Redirect {
    tracing::info!(level = ?flash.level, flash = %flash.message, location, "Redirecting");
    Redirect::to(location)
}
