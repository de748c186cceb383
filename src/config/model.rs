//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_forms")]
    pub forms: Vec<FormConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            forms: default_forms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Target URL shared by every form: `<base_url>/<year>/day/<day>`.
    pub fn form_action(&self) -> String {
        format!(
            "{}/{}/day/{}",
            self.server.base_url.trim_end_matches('/'),
            self.server.year,
            self.server.day
        )
    }
}

fn default_forms() -> Vec<FormConfig> {
    vec![FormConfig::part(1), FormConfig::part(2)]
}

/// The puzzle server the forms post to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_year")]
    pub year: u32,
    #[serde(default = "default_day")]
    pub day: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            year: default_year(),
            day: default_day(),
        }
    }
}

/// One upload form and the identifiers of the regions it drives. Missing
/// keys fall back to the part 1 form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub title: String,
    pub form_id: String,
    pub countdown_id: String,
    pub result_id: String,
    pub file_input_id: String,
    pub chosen_label_id: String,
    pub answer_field: String,
    /// Value of the hidden `level` field.
    pub level: String,
    pub method: String,
    /// The form's `data-countdown` attribute, in seconds.
    pub countdown: String,
    pub max_upload_mb: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::part(1)
    }
}

impl FormConfig {
    /// Default form for puzzle part `n`, named the way the puzzle server
    /// expects its multipart fields.
    pub fn part(n: u32) -> Self {
        Self {
            title: format!("Part {}", n),
            form_id: format!("puzzle-upload-form-{}", n),
            countdown_id: format!("countdown-{}", n),
            result_id: format!("result-{}", n),
            file_input_id: format!("puzzle-upload-{}", n),
            chosen_label_id: format!("puzzle-chosen-{}", n),
            answer_field: format!("puzzle-answer-{}", n),
            level: n.to_string(),
            method: default_method(),
            countdown: default_countdown(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            filter: default_filter(),
        }
    }
}

fn default_base_url() -> String {
    "http://192.168.1.100".to_string()
}
fn default_year() -> u32 {
    2023
}
fn default_day() -> u32 {
    1
}
fn default_method() -> String {
    "POST".to_string()
}
fn default_countdown() -> String {
    "30".to_string()
}
fn default_max_upload_mb() -> u64 {
    1
}
fn default_log_dir() -> String {
    "~/.local/share/puzzle-upload/logs".to_string()
}
fn default_filter() -> String {
    "info".to_string()
}
