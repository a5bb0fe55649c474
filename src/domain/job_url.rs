use std::fmt;

use url::Url;

/// An absolute `http`/`https` URL accepted for capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobUrl(Url);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobUrlError {
    #[error("malformed url: {0}")]
    Malformed(String),
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    #[error("url has no host")]
    MissingHost,
}

impl JobUrl {
    pub fn parse(raw: &str) -> Result<Self, JobUrlError> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed).map_err(|e| JobUrlError::Malformed(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(JobUrlError::UnsupportedScheme(other.to_string())),
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(url)),
            _ => Err(JobUrlError::MissingHost),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for JobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
