use reqwest::blocking::Client;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::PermitError;

/// Somewhere a permit dataset can be read from in one shot.
pub trait DataSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<Vec<u8>, PermitError>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
    pub timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn fetch_error(&self, err: impl std::fmt::Display) -> PermitError {
        PermitError::Fetch {
            source_desc: self.url.clone(),
            message: err.to_string(),
        }
    }
}

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>, PermitError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| self.fetch_error(err))?;
        let response = client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|err| self.fetch_error(err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PermitError::HttpStatus {
                source_desc: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().map_err(|err| self.fetch_error(err))?;
        Ok(body.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>, PermitError> {
        fs::read(&self.path).map_err(|err| PermitError::Read {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })
    }
}

pub fn is_http_location(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// URLs go over HTTP; anything else is read as a local file.
pub fn source_for(location: &str, timeout_secs: u64) -> Box<dyn DataSource> {
    let trimmed = location.trim();
    if is_http_location(trimmed) {
        Box::new(HttpSource::new(trimmed, timeout_secs))
    } else {
        Box::new(FileSource {
            path: PathBuf::from(trimmed),
        })
    }
}
