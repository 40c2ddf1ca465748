//! The workshop service contract and its HTTP implementation.
//!
//! [`WorkshopApi`] is the seam between the reconciler / CLI and the remote
//! service; [`HttpApi`] implements it with a blocking `ureq` agent. One
//! request is in flight at a time and nothing is retried.

use std::io::Read;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use oficina_core::types::{Participant, Ra, Workshop, WorkshopDraft, WorkshopId};
use oficina_core::Config;

use crate::error::ApiError;

/// Operations offered by the workshop service.
pub trait WorkshopApi {
    /// `GET /participantes` — the full participant catalog.
    fn list_participants(&self) -> Result<Vec<Participant>, ApiError>;

    /// `POST /participantes`.
    fn create_participant(&self, participant: &Participant) -> Result<Participant, ApiError>;

    /// `PUT /participantes/{ra}`.
    fn update_participant(&self, participant: &Participant) -> Result<(), ApiError>;

    /// `DELETE /participantes/{ra}`.
    fn delete_participant(&self, ra: &Ra) -> Result<(), ApiError>;

    /// `GET /workshops`.
    fn list_workshops(&self) -> Result<Vec<Workshop>, ApiError>;

    /// `GET /workshops/{id}`.
    fn get_workshop(&self, id: WorkshopId) -> Result<Workshop, ApiError>;

    /// `POST /workshops`.
    fn create_workshop(&self, draft: &WorkshopDraft) -> Result<Workshop, ApiError>;

    /// `PUT /workshops/{id}` with the full record.
    fn update_workshop(&self, workshop: &Workshop) -> Result<(), ApiError>;

    /// `DELETE /workshops/{id}`.
    fn delete_workshop(&self, id: WorkshopId) -> Result<(), ApiError>;

    /// `PUT /workshops/participantes/{id}` — replaces the whole roster with `ras`.
    ///
    /// The service answers `409 Conflict` when `ras` exceeds the workshop capacity.
    fn replace_roster(&self, id: WorkshopId, ras: &[Ra]) -> Result<(), ApiError>;

    /// `GET /certificados/workshops/{id}/zip` — zip archive bytes.
    fn download_certificates(&self, id: WorkshopId) -> Result<Vec<u8>, ApiError>;
}

/// Request body of the roster replacement endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPayload {
    #[serde(rename = "participantes")]
    pub participants: Vec<Ra>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Longest raw error body echoed back in an [`ApiError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

/// [`WorkshopApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { agent, base_url }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded as a single
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<String, ApiError> {
        let invalid = |message: String| ApiError::InvalidUrl {
            url: self.base_url.clone(),
            message,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn call(&self, method: &'static str, url: &str) -> Result<ureq::Response, ApiError> {
        tracing::debug!(method, url, "request");
        self.agent
            .request(method, url)
            .call()
            .map_err(|err| map_error(method, url, err))
    }

    fn send<B: Serialize>(
        &self,
        method: &'static str,
        url: &str,
        body: &B,
    ) -> Result<ureq::Response, ApiError> {
        tracing::debug!(method, url, "request with JSON body");
        self.agent
            .request(method, url)
            .send_json(body)
            .map_err(|err| map_error(method, url, err))
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let response = self.call("GET", &url)?;
        decode(response, url)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let response = self.send("POST", &url, body)?;
        decode(response, url)
    }
}

impl WorkshopApi for HttpApi {
    fn list_participants(&self) -> Result<Vec<Participant>, ApiError> {
        self.get_json(&["participantes"])
    }

    fn create_participant(&self, participant: &Participant) -> Result<Participant, ApiError> {
        let created = self.post_json(&["participantes"], participant)?;
        tracing::info!(ra = %participant.ra, "participant registered");
        Ok(created)
    }

    fn update_participant(&self, participant: &Participant) -> Result<(), ApiError> {
        let url = self.endpoint(&["participantes", participant.ra.as_str()])?;
        self.send("PUT", &url, participant)?;
        tracing::info!(ra = %participant.ra, "participant updated");
        Ok(())
    }

    fn delete_participant(&self, ra: &Ra) -> Result<(), ApiError> {
        let url = self.endpoint(&["participantes", ra.as_str()])?;
        self.call("DELETE", &url)?;
        tracing::info!(ra = %ra, "participant deleted");
        Ok(())
    }

    fn list_workshops(&self) -> Result<Vec<Workshop>, ApiError> {
        self.get_json(&["workshops"])
    }

    fn get_workshop(&self, id: WorkshopId) -> Result<Workshop, ApiError> {
        self.get_json(&["workshops", &id.to_string()])
    }

    fn create_workshop(&self, draft: &WorkshopDraft) -> Result<Workshop, ApiError> {
        let created: Workshop = self.post_json(&["workshops"], draft)?;
        tracing::info!(id = %created.id, title = %created.title, "workshop created");
        Ok(created)
    }

    fn update_workshop(&self, workshop: &Workshop) -> Result<(), ApiError> {
        let url = self.endpoint(&["workshops", &workshop.id.to_string()])?;
        self.send("PUT", &url, workshop)?;
        tracing::info!(id = %workshop.id, "workshop updated");
        Ok(())
    }

    fn delete_workshop(&self, id: WorkshopId) -> Result<(), ApiError> {
        let url = self.endpoint(&["workshops", &id.to_string()])?;
        self.call("DELETE", &url)?;
        tracing::info!(id = %id, "workshop deleted");
        Ok(())
    }

    fn replace_roster(&self, id: WorkshopId, ras: &[Ra]) -> Result<(), ApiError> {
        let url = self.endpoint(&["workshops", "participantes", &id.to_string()])?;
        let payload = RosterPayload {
            participants: ras.to_vec(),
        };
        self.send("PUT", &url, &payload)?;
        Ok(())
    }

    fn download_certificates(&self, id: WorkshopId) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(&["certificados", "workshops", &id.to_string(), "zip"])?;
        let response = self.call("GET", &url)?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| ApiError::Decode { url, source })?;
        Ok(bytes)
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response, url: String) -> Result<T, ApiError> {
    response
        .into_json()
        .map_err(|source| ApiError::Decode { url, source })
}

fn map_error(method: &'static str, url: &str, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => ApiError::Status {
            method,
            url: url.to_string(),
            status,
            message: error_message(response),
        },
        ureq::Error::Transport(transport) => ApiError::Transport {
            method,
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}

fn error_message(response: ureq::Response) -> Option<String> {
    let body = response.into_string().ok()?;
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        return Some(message);
    }
    Some(body.chars().take(MAX_ERROR_BODY).collect())
}
