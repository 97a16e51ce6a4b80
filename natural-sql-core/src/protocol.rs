//! Wire format of the query service
//!
//! Request: `{"query": "<question>"}`.
//! Response: either `{"error": "..."}` or
//! `{"generated_sql": "...", "results": [[...], ...]}`. The HTTP status is not
//! consulted; the body alone decides the outcome.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{QueryError, Result},
    results::{ResultSet, Row},
};

/// Body POSTed to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's question, exactly as typed
    pub query: String,
}

impl QueryRequest {
    /// Create a request for a question
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Serialize to the JSON text sent on the wire
    pub fn to_json(&self) -> String {
        serde_json::json!({ "query": self.query }).to_string()
    }
}

/// Successful answer: the SQL the service generated and the rows it returned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// Generated query text
    pub generated_sql: String,
    /// Rows from executing it
    pub results: ResultSet,
}

/// Interpret a response body
///
/// `status` is only used to enrich the message when the body is not JSON.
pub fn parse_response(status: u16, body: &str) -> Result<QueryAnswer> {
    parse_response_reader(status, body.as_bytes())
}

/// Interpret a response body streamed from `reader`
///
/// The body is decoded as it is read, so its size is not bounded. A read
/// failure part way through is a transport error, not an invalid body.
pub fn parse_response_reader(status: u16, reader: impl Read) -> Result<QueryAnswer> {
    let value: Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            QueryError::transport(format!("Failed to read response body: {e}"))
        } else if (200..300).contains(&status) {
            QueryError::InvalidBody {
                message: format!("Invalid JSON in response: {e}"),
            }
        } else {
            QueryError::InvalidBody {
                message: format!("HTTP {status}: invalid JSON in response: {e}"),
            }
        }
    })?;

    interpret(value)
}

/// Interpret an already-parsed response document
pub fn interpret(value: Value) -> Result<QueryAnswer> {
    let Value::Object(mut fields) = value else {
        return Err(QueryError::MalformedResponse { field: "error" });
    };

    if let Some(message) = fields.get("error").and_then(error_message) {
        return Err(QueryError::Service { message });
    }

    let generated_sql = match fields.remove("generated_sql") {
        Some(Value::String(sql)) => sql,
        _ => {
            return Err(QueryError::MalformedResponse {
                field: "generated_sql",
            })
        },
    };

    let rows = match fields.remove("results") {
        Some(Value::Array(rows)) => rows
            .into_iter()
            .map(|row| match row {
                Value::Array(cells) => Ok(cells),
                _ => Err(QueryError::MalformedResponse { field: "results" }),
            })
            .collect::<Result<Vec<Row>>>()?,
        _ => return Err(QueryError::MalformedResponse { field: "results" }),
    };

    Ok(QueryAnswer {
        generated_sql,
        results: ResultSet::new(rows),
    })
}

/// An `error` field counts only when it is truthy: `null`, `false`, `0` and `""` are ignored
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
