use crate::domain::model::Project;
use crate::domain::ports::ProjectSource;
use crate::utils::error::LoadError;
use async_trait::async_trait;
use reqwest::Client;

/// Reads a whole table through the Supabase PostgREST endpoint
/// (`/rest/v1/<table>?select=*`).
#[derive(Debug, Clone)]
pub struct SupabaseSource {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }
}

#[async_trait]
impl ProjectSource for SupabaseSource {
    async fn fetch_all(&self) -> Result<Vec<Project>, LoadError> {
        let url = self.table_url();
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // decode from text so a malformed row surfaces as a Decode error
        let body = response.text().await?;
        let projects: Vec<Project> = serde_json::from_str(&body)?;
        Ok(projects)
    }
}
