use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use ureq::Agent;

use crate::dashboard::DashboardPayload;
use crate::error::{DashboardError, Result};

/// The one read-only call that produces dashboard data.
pub trait DataSource {
    fn fetch(&self) -> Result<DashboardPayload>;

    /// Human-readable location, for logs and status output.
    fn describe(&self) -> String;
}

/// Calls a whitelisted desk method over HTTP.
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: &str, method: &str, timeout: Duration) -> Self {
        Self {
            url: method_url(base_url, method),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// `http://host:8000/` + `pkg.module.fn` -> `http://host:8000/api/method/pkg.module.fn`
pub fn method_url(base_url: &str, method: &str) -> String {
    format!(
        "{}/api/method/{}",
        base_url.trim_end_matches('/'),
        method.trim_start_matches('/')
    )
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<DashboardPayload> {
        log::info!("fetching dashboard data from {}", self.url);

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        let body: String = agent
            .get(&self.url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| DashboardError::Fetch(e.to_string()))?
            .body_mut()
            .read_to_string()
            .map_err(|e| DashboardError::Fetch(e.to_string()))?;

        log::debug!("received {} bytes", body.len());
        parse_body(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads a saved response body from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<DashboardPayload> {
        log::info!("reading dashboard data from {}", self.path.display());

        let body = std::fs::read_to_string(&self.path)
            .map_err(|e| DashboardError::Fetch(format!("{}: {e}", self.path.display())))?;
        parse_body(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn parse_body(body: &str) -> Result<DashboardPayload> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| DashboardError::Fetch(format!("response is not JSON: {e}")))?;

    DashboardPayload::from_value(value)
        .ok_or_else(|| DashboardError::Fetch("response contained no payload".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn method_url_joins_cleanly() {
        assert_eq!(
            method_url("http://localhost:8000/", "app.page.get_data"),
            "http://localhost:8000/api/method/app.page.get_data"
        );
        assert_eq!(
            HttpSource::new("https://erp.example.com", "/x.y", Duration::from_secs(1)).url(),
            "https://erp.example.com/api/method/x.y"
        );
    }

    #[test]
    fn file_source_reads_envelope() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"message": {{"cash_balance": 42.5}}}}"#).unwrap();

        let payload = FileSource::new(file.path().to_path_buf()).fetch().unwrap();
        assert_eq!(payload.cash_balance, 42.5);
    }

    #[test]
    fn empty_message_is_a_fetch_failure() {
        let err = parse_body(r#"{"message": null}"#).unwrap_err();
        assert!(matches!(err, DashboardError::Fetch(_)));
        assert!(err.to_string().contains("no payload"));
    }

    #[test]
    fn non_json_is_a_fetch_failure() {
        let err = parse_body("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, DashboardError::Fetch(_)));
    }

    #[test]
    fn missing_file_is_a_fetch_failure() {
        let err = FileSource::new(PathBuf::from("/nonexistent/payload.json"))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, DashboardError::Fetch(_)));
    }
}
