use crate::config::FormConfig;
use std::path::{Path, PathBuf};

pub type FormId = usize;

/// A file picked in a form's file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    /// Read name and size from the filesystem.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct FileInput {
    pub id: String,
    pub files: Vec<SelectedFile>,
}

impl FileInput {
    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    /// Re-read name and size of every selected file.
    pub fn refresh(&mut self) -> std::io::Result<()> {
        for file in &mut self.files {
            *file = SelectedFile::from_path(&file.path)?;
        }
        Ok(())
    }
}

/// Declared attributes and current values of one upload form.
#[derive(Debug, Clone)]
pub struct FormElement {
    pub id: String,
    pub action: String,
    pub method: String,
    /// Raw `data-countdown` attribute, parsed on every submit.
    pub countdown: String,
    pub fields: Vec<(String, String)>,
    pub file_input: FileInput,
}

impl FormElement {
    pub fn from_config(cfg: &FormConfig, action: String) -> Self {
        Self {
            id: cfg.form_id.clone(),
            action,
            method: cfg.method.clone(),
            countdown: cfg.countdown.clone(),
            fields: vec![
                ("level".to_string(), cfg.level.clone()),
                (cfg.answer_field.clone(), String::new()),
            ],
            file_input: FileInput {
                id: cfg.file_input_id.clone(),
                files: Vec::new(),
            },
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_field(&mut self, name: &str, value: String) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Parse the `data-countdown` attribute. Unparseable values count as zero.
    pub fn countdown_seconds(&self) -> i64 {
        match self.countdown.trim().parse::<i64>() {
            Ok(secs) => secs,
            Err(e) => {
                tracing::warn!(form = %self.id, value = %self.countdown, "invalid data-countdown: {}", e);
                0
            }
        }
    }
}
