use crate::error::{ErrorKind, StudioError};
use serde::Serialize;

/// In-flight flag of a single form. Only one submission may be outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pending {
    in_flight: bool,
}

impl Pending {
    /// Marks the form busy. Returns false if it already was.
    pub fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Text for the submit control.
    pub fn label<'a>(&self, idle: &'a str, busy: &'a str) -> &'a str {
        if self.in_flight {
            busy
        } else {
            idle
        }
    }
}

/// The error banner of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ViewError {
    /// Keeps the kind of `err` but shows a fixed message.
    pub fn with_message(err: &StudioError, message: impl Into<String>) -> Self {
        Self {
            kind: err.kind(),
            message: message.into(),
        }
    }
}

impl From<&StudioError> for ViewError {
    fn from(err: &StudioError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

impl From<StudioError> for ViewError {
    fn from(err: StudioError) -> Self {
        ViewError::from(&err)
    }
}
