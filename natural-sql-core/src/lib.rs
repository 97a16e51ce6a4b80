//! # natural-sql core
//!
//! Client-side core for a natural-language-to-SQL service: the wire format,
//! an HTTP client, result-set rendering and the [`QueryForm`] state machine
//! that a front end binds its widgets to.
//!
//! The service itself (translation and query execution) lives elsewhere and
//! is reached through the [`QueryService`] trait.
//!
//! ## Quick Start
//!
//! ```no_run
//! use natural_sql_core::{ClientConfig, HttpQueryClient, QueryForm};
//!
//! # async fn example() {
//! let client = HttpQueryClient::new(ClientConfig::default());
//! let mut form = QueryForm::new();
//! form.update_input("Show movies with Robert Downey Jr.");
//! form.submit_with(&client).await.expect("nothing else in flight");
//!
//! if let Some(sql) = form.generated_sql() {
//!     println!("{sql}");
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// HTTP client and the service trait
pub mod client;
/// Client configuration
pub mod config;
/// Error types
pub mod error;
/// Query form controller
pub mod form;
/// Request and response wire types
pub mod protocol;
/// Result sets and their rendering
pub mod results;

pub use client::{HttpQueryClient, QueryService};
pub use config::{ClientConfig, ConfigFormat, DEFAULT_ENDPOINT};
pub use error::{ConfigError, ErrorKind, QueryError, Result};
pub use form::{FormStatus, QueryForm, Resolution, SubmitRejected, Submission};
pub use protocol::{QueryAnswer, QueryRequest};
pub use results::{ResultSet, Row};
