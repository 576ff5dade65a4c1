//! Remote spreadsheet CSV export fetching.
//!
//! The source sheet must be published to the web; its CSV export URL is
//! public and needs no credentials. This crate also downloads external
//! image bytes for the optional re-hosting pass.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Sheet export fetch failed: {status} for {url}")]
    BadStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("Sheet export is empty")]
    EmptyExport,
}

/// Identifies one published sheet tab.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    /// Tab gid; the first tab is "0".
    pub gid: String,
}

impl SheetConfig {
    pub fn new(spreadsheet_id: impl Into<String>, gid: Option<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            gid: gid.unwrap_or_else(|| "0".to_string()),
        }
    }

    /// The CSV export URL for this tab.
    pub fn export_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
            self.spreadsheet_id, self.gid
        )
    }
}

/// HTTP client for sheet exports and image downloads.
pub struct SheetClient {
    http: reqwest::blocking::Client,
}

impl SheetClient {
    pub fn new() -> Result<Self, SheetError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http })
    }

    /// Fetch the raw CSV text of a published sheet tab.
    ///
    /// A non-success status or an all-whitespace body fails the whole
    /// batch; there are no rows to process without the export.
    pub fn fetch_sheet_csv(&self, config: &SheetConfig) -> Result<String, SheetError> {
        let url = config.export_url();
        log::info!("fetching sheet export: {}", url);

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SheetError::BadStatus { status, url });
        }

        let text = resp.text()?;
        if text.trim().is_empty() {
            return Err(SheetError::EmptyExport);
        }
        Ok(text)
    }

    /// Download image bytes for re-hosting. Returns the body and the
    /// response content type (defaulting to image/png when absent).
    pub fn download_image(&self, url: &str) -> Result<(Vec<u8>, String), SheetError> {
        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SheetError::BadStatus {
                status,
                url: url.to_string(),
            });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();
        let bytes = resp.bytes()?.to_vec();
        Ok((bytes, content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_url_includes_gid() {
        let config = SheetConfig::new("SHEET123", Some("42".to_string()));
        assert_eq!(
            config.export_url(),
            "https://docs.google.com/spreadsheets/d/SHEET123/export?format=csv&gid=42"
        );
    }

    #[test]
    fn gid_defaults_to_first_tab() {
        let config = SheetConfig::new("SHEET123", None);
        assert!(config.export_url().ends_with("gid=0"));
    }
}
