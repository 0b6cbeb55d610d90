//! Artifact sources: local files and HTTP.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, warn};
use url::Url;

use mapcodec_core_common::{ArtifactSource, RetrievalError};

/// User-Agent sent with artifact requests.
const USER_AGENT: &str = concat!("mapcodec/", env!("CARGO_PKG_VERSION"));

/// Reads an artifact from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    location: String,
}

impl FileSource {
    /// Creates a source for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[async_trait]
impl ArtifactSource for FileSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Bytes, RetrievalError> {
        match tokio::fs::read(&self.path).await {
            Ok(contents) => Ok(Bytes::from(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(RetrievalError::NotFound {
                    location: self.location.clone(),
                })
            },
            Err(source) => Err(RetrievalError::Io {
                location: self.location.clone(),
                source,
            }),
        }
    }
}

/// Fetches an artifact over HTTP(S) with a single GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    location: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSource {
    /// Creates a source for `url` whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Network`] if the HTTP client cannot be built.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RetrievalError::Network {
                location: url.to_string(),
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        let location = url.to_string();
        Ok(Self {
            url,
            location,
            client,
            timeout,
        })
    }

    fn transport_error(&self, err: &reqwest::Error) -> RetrievalError {
        if err.is_timeout() {
            RetrievalError::Timeout {
                location: self.location.clone(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            RetrievalError::Network {
                location: self.location.clone(),
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl ArtifactSource for HttpSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Bytes, RetrievalError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        debug!("GET {} -> {status}", self.location);
        if !status.is_success() {
            warn!("Artifact request to {} failed with {status}", self.location);
            return Err(RetrievalError::Status {
                location: self.location.clone(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))
    }
}

/// Picks a source for a location string.
///
/// `http://` and `https://` locations are fetched over HTTP; anything else is
/// treated as a filesystem path.
///
/// # Errors
///
/// Returns [`RetrievalError::InvalidLocation`] for an empty location or an
/// unparseable URL.
pub fn source_for(
    location: &str,
    timeout: Duration,
) -> Result<Box<dyn ArtifactSource>, RetrievalError> {
    if location.trim().is_empty() {
        return Err(RetrievalError::InvalidLocation {
            location: location.to_string(),
            reason: "location is empty".to_string(),
        });
    }

    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        let url = Url::parse(location).map_err(|e| RetrievalError::InvalidLocation {
            location: location.to_string(),
            reason: e.to_string(),
        })?;
        return Ok(Box::new(HttpSource::new(url, timeout)?));
    }

    Ok(Box::new(FileSource::new(location)))
}
