use crate::{
    config::BackendConfig,
    data::student::{Student, StudentId, StudentPayload},
    endpoints::Endpoint,
    error::{BuildClientSnafu, DecodeResponseSnafu, RosterError, RosterResult, SendRequestSnafu},
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use snafu::ResultExt;
use std::{fmt::Debug, sync::Arc};

/// Everything the console needs from the student REST API.
#[async_trait]
pub trait StudentBackend: Send + Sync + Debug {
    async fn list_students(&self) -> RosterResult<Vec<Student>>;
    async fn register_student(&self, payload: &StudentPayload) -> RosterResult<Student>;
    async fn update_student(&self, id: &StudentId, payload: &StudentPayload)
    -> RosterResult<Student>;
    async fn delete_student(&self, id: &StudentId) -> RosterResult<()>;
}

#[derive(Clone, Debug)]
pub struct HttpStudentBackend {
    client: Client,
    config: Arc<BackendConfig>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpStudentBackend {
    pub fn new(config: Arc<BackendConfig>) -> RosterResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context(BuildClientSnafu)?;

        Ok(Self { client, config })
    }

    fn request(&self, method: Method, endpoint: &Endpoint<'_>) -> RequestBuilder {
        debug!(%method, %endpoint, section = ?endpoint.section(), "Sending backend request");
        self.client.request(method, self.config.url_for(endpoint.path()))
    }

    async fn send(request: RequestBuilder, endpoint: &Endpoint<'_>) -> RosterResult<Response> {
        let response = request.send().await.context(SendRequestSnafu {
            endpoint: endpoint.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message)
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Err(RosterError::BackendStatus { status, message })
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        endpoint: &Endpoint<'_>,
    ) -> RosterResult<T> {
        response.json().await.context(DecodeResponseSnafu {
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl StudentBackend for HttpStudentBackend {
    async fn list_students(&self) -> RosterResult<Vec<Student>> {
        let endpoint = Endpoint::DisplayStudents;
        let response = Self::send(self.request(Method::GET, &endpoint), &endpoint).await?;
        Self::decode(response, &endpoint).await
    }

    async fn register_student(&self, payload: &StudentPayload) -> RosterResult<Student> {
        let endpoint = Endpoint::Register;
        let response =
            Self::send(self.request(Method::POST, &endpoint).json(payload), &endpoint).await?;
        Self::decode(response, &endpoint).await
    }

    async fn update_student(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> RosterResult<Student> {
        let id = id.to_string();
        let endpoint = Endpoint::UpdateStudent(&id);
        let response =
            Self::send(self.request(Method::PUT, &endpoint).json(payload), &endpoint).await?;
        Self::decode(response, &endpoint).await
    }

    async fn delete_student(&self, id: &StudentId) -> RosterResult<()> {
        let id = id.to_string();
        let endpoint = Endpoint::DeleteStudent(&id);
        Self::send(self.request(Method::DELETE, &endpoint), &endpoint).await?;
        Ok(())
    }
}
