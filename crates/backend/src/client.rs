//! HTTP client for the billing backend.
//!
//! Thin on purpose: no retries, no local timeouts, no caching. A caller
//! that abandons a request simply drops the future and discards the result.

use thiserror::Error;

use arriendo_documents::Document;
use arriendo_orders::WorkOrderSummary;
use arriendo_query::{DocumentFilter, WorkOrderFilter};
use arriendo_rentals::ActiveRentalRow;

use crate::dto::CreateWorkOrderRequest;

/// A backend call failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never completed (connection, DNS, deserialization).
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

/// Client for the billing backend endpoints this layer consumes.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /documentos` with the filter rendered as query parameters.
    /// Documents arrive with their forward and inverse relations populated.
    pub async fn search_documents(
        &self,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>, TransportError> {
        let response = self
            .http
            .get(self.url("/documentos"))
            .query(&filter.query_params())
            .send()
            .await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// Search degrade policy: a transport failure shows up as "no results",
    /// never as an error. The failure is logged and swallowed here.
    pub async fn search_documents_or_empty(&self, filter: &DocumentFilter) -> Vec<Document> {
        match self.search_documents(filter).await {
            Ok(docs) => docs,
            Err(err) => {
                tracing::warn!(error = %err, "document search failed; degrading to empty result");
                Vec::new()
            }
        }
    }

    /// `GET /ordenes`, optionally restricted to pending orders.
    pub async fn list_work_orders(
        &self,
        filter: &WorkOrderFilter,
    ) -> Result<Vec<WorkOrderSummary>, TransportError> {
        let response = self
            .http
            .get(self.url("/ordenes"))
            .query(&filter.query_params())
            .send()
            .await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// `GET /ordenes/estado-arriendos`: one row per active rental.
    pub async fn active_rentals(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<ActiveRentalRow>, TransportError> {
        let mut request = self.http.get(self.url("/ordenes/estado-arriendos"));
        if let Some(query) = query {
            request = request.query(&[("query", query)]);
        }
        let response = request.send().await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// `POST /ordenes`. A failure is returned to the caller as-is; there is
    /// no automatic retry, and the caller keeps its form state to retry
    /// manually.
    pub async fn submit_work_order(
        &self,
        request: &CreateWorkOrderRequest,
    ) -> Result<WorkOrderSummary, TransportError> {
        let response = self
            .http
            .post(self.url("/ordenes"))
            .json(request)
            .send()
            .await?;
        Ok(expect_ok(response).await?.json().await?)
    }
}

/// Map non-success statuses to [`TransportError::Rejected`], keeping
/// whatever detail the backend wrote in the body.
async fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    Err(TransportError::Rejected {
        status: status.as_u16(),
        detail: detail.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_its_trailing_slash() {
        arriendo_observability::init();

        let client = BackendClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/documentos"), "http://localhost:8000/api/documentos");
    }
}
