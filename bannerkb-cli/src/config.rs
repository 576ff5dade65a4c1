//! CLI configuration: database location, media directory, spreadsheet
//! source, and AI credentials.
//!
//! Priority per field: env var > config file > default. The AI key has no
//! default; commands that need it fail with a config error before any
//! network work starts.

use std::path::PathBuf;

use crate::error::CliError;

/// TOML config file format (`~/.config/bannerkb/config.toml`).
#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    storage: Option<StorageSection>,
    sheet: Option<SheetSection>,
    ai: Option<AiSection>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct StorageSection {
    db_path: Option<PathBuf>,
    media_dir: Option<PathBuf>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct SheetSection {
    spreadsheet_id: Option<String>,
    gid: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct AiSection {
    api_key: Option<String>,
    model: Option<String>,
}

/// Resolved configuration used by the commands.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub db_path: PathBuf,
    pub media_dir: PathBuf,
    pub spreadsheet_id: Option<String>,
    pub sheet_gid: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_model: Option<String>,
}

/// Return the path to the config file.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bannerkb").join("config.toml"))
}

fn load_config_file() -> Option<ConfigFile> {
    let path = config_path()?;
    let text = std::fs::read_to_string(&path).ok()?;
    match toml::from_str(&text) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

fn data_dir() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|d| d.join("bannerkb"))
        .ok_or_else(|| CliError::config("could not determine data directory"))
}

impl AppConfig {
    pub(crate) fn load(db_override: Option<PathBuf>) -> Result<Self, CliError> {
        let file = load_config_file().unwrap_or_default();
        let storage = file.storage.unwrap_or_default();
        let sheet = file.sheet.unwrap_or_default();
        let ai = file.ai.unwrap_or_default();

        let db_path = db_override
            .or_else(|| std::env::var("BANNERKB_DB").ok().map(PathBuf::from))
            .or(storage.db_path)
            .map_or_else(|| data_dir().map(|d| d.join("bannerkb.db")), Ok)?;

        let media_dir = std::env::var("BANNERKB_MEDIA_DIR")
            .ok()
            .map(PathBuf::from)
            .or(storage.media_dir)
            .map_or_else(|| data_dir().map(|d| d.join("media")), Ok)?;

        let spreadsheet_id = std::env::var("BANNERKB_SPREADSHEET_ID")
            .ok()
            .or(sheet.spreadsheet_id);

        let sheet_gid = std::env::var("BANNERKB_SHEET_GID").ok().or(sheet.gid);

        let ai_api_key = std::env::var("OPENAI_API_KEY").ok().or(ai.api_key);
        let ai_model = std::env::var("BANNERKB_AI_MODEL").ok().or(ai.model);

        Ok(Self {
            db_path,
            media_dir,
            spreadsheet_id,
            sheet_gid,
            ai_api_key,
            ai_model,
        })
    }

    /// Spreadsheet source, or a config error telling the user how to set it.
    pub(crate) fn require_sheet(&self) -> Result<bannerkb_sheets::SheetConfig, CliError> {
        let id = self.spreadsheet_id.as_deref().ok_or_else(|| {
            CliError::config(
                "no spreadsheet configured. Set BANNERKB_SPREADSHEET_ID or [sheet] spreadsheet_id in the config file",
            )
        })?;
        Ok(bannerkb_sheets::SheetConfig::new(id, self.sheet_gid.clone()))
    }

    /// AI client configuration. Absence of a key is a config error here,
    /// before any client is constructed.
    pub(crate) fn require_ai(&self) -> Result<bannerkb_ai::AiConfig, CliError> {
        let key = self.ai_api_key.as_deref().ok_or_else(|| {
            CliError::config(
                "no AI API key configured. Set OPENAI_API_KEY or [ai] api_key in the config file",
            )
        })?;
        let mut config = bannerkb_ai::AiConfig::new(key);
        if let Some(model) = &self.ai_model {
            config.model = model.clone();
        }
        Ok(config)
    }
}
