//! HTTP client for the patient administration API.

use api_shared::{ListPayload, PatientDto, PatientVisitDto};
use reqwest::StatusCode;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to reach server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("patient not found: {0}")]
    NotFound(Uuid),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Result of asking for a patient's visits.
///
/// The server answers 404 when a patient has no visits. That is a normal outcome for
/// the caller, kept apart from transport or server failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisitsOutcome {
    Found(Vec<PatientVisitDto>),
    NoVisits,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetches the full patient list. Accepts a flat array or a `$values` envelope.
    pub async fn fetch_patients(&self) -> Result<Vec<PatientDto>, ClientError> {
        let resp = self.http.get(self.url("patients")).send().await?;
        let resp = ensure_success(resp).await?;
        let payload: ListPayload<PatientDto> = resp.json().await?;
        Ok(payload.into_vec())
    }

    pub async fn get_patient_by_id(&self, id: Uuid) -> Result<PatientDto, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("patients/{}", id)))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(id));
        }
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn fetch_patient_visits(&self, id: Uuid) -> Result<VisitsOutcome, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("patients/{}/visits", id)))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!("no visits for patient {}", id);
            return Ok(VisitsOutcome::NoVisits);
        }
        let resp = ensure_success(resp).await?;
        let payload: ListPayload<PatientVisitDto> = resp.json().await?;
        Ok(VisitsOutcome::Found(payload.into_vec()))
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
