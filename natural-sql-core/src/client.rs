//! HTTP client for the query service
//!
//! [`QueryService`] is the seam between the form controller and the network;
//! [`HttpQueryClient`] is the production implementation on top of `ureq`.

use async_trait::async_trait;

use crate::{
    config::ClientConfig,
    error::{QueryError, Result},
    protocol::{parse_response_reader, QueryAnswer, QueryRequest},
};

/// Something that can turn a natural-language question into an answer
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Send one question and wait for its outcome
    async fn ask(&self, question: &str) -> Result<QueryAnswer>;

    /// Where questions go, for display
    fn endpoint(&self) -> &str;
}

/// Blocking HTTP client, one POST per question, no retries
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl HttpQueryClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Self {
            config,
            agent: builder.build(),
        }
    }

    /// Access the config
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST the question and interpret the reply
    ///
    /// Non-2xx replies are not failures by themselves: the service reports its
    /// own errors as a JSON body on a 400, so the body is read either way. Uses
    /// blocking I/O; async callers go through [`QueryService::ask`].
    pub fn post_query(&self, question: &str) -> Result<QueryAnswer> {
        let body = QueryRequest::new(question).to_json();
        tracing::debug!("Sending query to {}: {}", self.config.endpoint, body);

        let response = match self
            .agent
            .post(&self.config.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                tracing::debug!("Query service answered with HTTP {code}");
                response
            },
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!("Query request to {} failed: {transport}", self.config.endpoint);
                return Err(QueryError::transport(transport.to_string()));
            },
        };

        let status = response.status();
        tracing::debug!("Received response (HTTP {status})");

        let outcome = parse_response_reader(status, response.into_reader());
        if let Err(ref e) = outcome {
            tracing::warn!("Query failed ({}): {e}", e.kind().label());
        }
        outcome
    }
}

#[async_trait]
impl QueryService for HttpQueryClient {
    async fn ask(&self, question: &str) -> Result<QueryAnswer> {
        let client = self.clone();
        let question = question.to_string();
        tokio::task::spawn_blocking(move || client.post_query(&question))
            .await
            .map_err(|e| QueryError::transport(format!("Query task failed: {e}")))?
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}
