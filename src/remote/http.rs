use super::{RemoteError, RemoteSource};
use crate::shared::EngineOptions;

/// Ruft das veröffentlichte Dokument per HTTP GET ab.
#[derive(Debug, Clone)]
pub struct HttpRemoteSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRemoteSource {
    /// Erstellt die Quelle mit URL und Timeout aus den Optionen.
    pub fn from_options(options: &EngineOptions) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("atlas-marker-editor/", env!("CARGO_PKG_VERSION")))
            .timeout(options.request_timeout())
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            url: options.source_url.clone(),
        })
    }

    /// Abgerufene URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSource for HttpRemoteSource {
    async fn fetch_document(&self) -> Result<String, RemoteError> {
        log::debug!("Rufe Remote-Quelle ab: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
