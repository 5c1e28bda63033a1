use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub uptime: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

/// Non-2xx reply from the frontend.
#[derive(Debug)]
pub struct SdkError {
    pub status: StatusCode,
    pub body: String,
}

impl std::fmt::Display for SdkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frontend returned error status {}: {}", self.status, self.body)
    }
}

impl std::error::Error for SdkError {}

pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<Health, Box<dyn std::error::Error>> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Users payload as returned by the backend.
    pub async fn users(&self) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self.client.get(self.url("/api/users")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(self.url("/api/users"))
            .json(user)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Plugin manifest: the routable page and the component names.
    pub async fn extensions(&self) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(self.url("/api/security/extensions"))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// All security panels for a registered entity.
    pub async fn security_overview(&self, entity: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(self.url(&format!("/api/security/{}", entity)))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// One named component for a registered entity.
    pub async fn security_component(
        &self,
        entity: &str,
        component: &str,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(self.url(&format!("/api/security/{}/{}", entity, component)))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// All security panels for an entity document supplied by the caller.
    pub async fn evaluate_entity(&self, entity: &Value) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(self.url("/api/security/overview"))
            .json(entity)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(resp: Response) -> Result<Response, SdkError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(SdkError { status, body })
    }
}
