//! The value a route hands back to the driver

use std::sync::Arc;

use serde_json::Value;

use crate::errors::AppError;
use crate::output::{PrintKind, Printable};

/// Route specific payload carried alongside the printed result
#[derive(Debug, Clone, Default)]
pub enum RouteData {
    #[default]
    None,
    Value(Value),
    /// The error a failed route was converted from
    Error(Arc<AppError>),
}

impl RouteData {
    pub fn value(&self) -> Option<&Value> {
        match self {
            RouteData::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            RouteData::Error(err) => Some(err),
            _ => None,
        }
    }

    /// The key a route produced: either the value itself when it is a
    /// string, or the `key` field of an object
    pub fn key(&self) -> Option<String> {
        match self.value()? {
            Value::String(key) => Some(key.clone()),
            Value::Object(map) => map.get("key")?.as_str().map(str::to_string),
            _ => None,
        }
    }
}

/// A printable outcome with a payload and a process exit code
#[derive(Debug, Clone)]
pub struct RouteResult {
    printable: Printable,
    data: RouteData,
    exit_code: i32,
}

impl RouteResult {
    pub fn new(printable: Printable, data: RouteData, exit_code: i32) -> Self {
        Self {
            printable,
            data,
            exit_code,
        }
    }

    pub fn confirm(text: impl Into<String>) -> Self {
        Printable::confirm(text).into()
    }

    pub fn success(text: impl Into<String>) -> Self {
        Printable::success(text).into()
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Printable::warning(text).into()
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Printable::raw(text).into()
    }

    /// An error result, exiting with 1
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Printable::error(text), RouteData::None, 1)
    }

    /// Convert a failed route into an error result carrying the error
    pub fn failure(err: AppError) -> Self {
        Self::new(
            Printable::error(err.to_string()),
            RouteData::Error(Arc::new(err)),
            1,
        )
    }

    pub fn group(children: Vec<Printable>) -> Self {
        Printable::group(children).into()
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = RouteData::Value(data);
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn printable(&self) -> &Printable {
        &self.printable
    }

    pub fn kind(&self) -> PrintKind {
        self.printable.kind()
    }

    pub fn text(&self) -> Option<&str> {
        self.printable.text()
    }

    pub fn data(&self) -> &RouteData {
        &self.data
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Whether this result reports an error
    pub fn is_error(&self) -> bool {
        self.kind() == PrintKind::Error
    }
}

impl From<Printable> for RouteResult {
    fn from(printable: Printable) -> Self {
        Self::new(printable, RouteData::None, 0)
    }
}

impl From<Vec<Printable>> for RouteResult {
    fn from(printables: Vec<Printable>) -> Self {
        Self::group(printables)
    }
}
