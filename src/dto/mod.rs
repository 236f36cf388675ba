pub mod movies;
pub mod reviews;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Describes a form the client should render: where it posts and which fields it sends.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormView {
    pub action: String,
    pub fields: Vec<String>,
    pub msg: Option<String>,
}

impl FormView {
    pub fn new(action: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            action: action.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            msg: None,
        }
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}

/// Treats empty and whitespace-only form values as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
