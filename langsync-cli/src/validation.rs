use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validation context for the sync-related commands
pub struct ValidationContext {
    pub directory: Option<String>,
    pub config_file: Option<String>,
    pub report_json: Option<String>,
    pub source_language: Option<String>,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationContext {
    pub fn new() -> Self {
        Self {
            directory: None,
            config_file: None,
            report_json: None,
            source_language: None,
        }
    }

    pub fn with_directory(mut self, directory: String) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_config_file(mut self, file: String) -> Self {
        self.config_file = Some(file);
        self
    }

    pub fn with_report_json(mut self, file: String) -> Self {
        self.report_json = Some(file);
        self
    }

    pub fn with_source_language(mut self, lang: String) -> Self {
        self.source_language = Some(lang);
        self
    }
}

/// Validate directory exists and can be listed
pub fn validate_directory(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("Directory does not exist: {}", path));
    }

    if !path_obj.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }

    if let Err(e) = std::fs::read_dir(path_obj) {
        return Err(format!("Cannot read directory {}: {}", path, e));
    }

    Ok(())
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    if let Some(parent) = path_obj.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        return Err(format!("Cannot create output directory: {}", e));
    }

    Ok(())
}

/// Validate language code format using unic-langid
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.trim().is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.trim().parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref directory) = context.directory {
        validate_directory(directory)
            .map_err(|e| format!("Directory validation failed: {}", e))?;
    }

    if let Some(ref config) = context.config_file {
        validate_file_path(config).map_err(|e| format!("Config validation failed: {}", e))?;
    }

    if let Some(ref report) = context.report_json {
        validate_output_path(report)
            .map_err(|e| format!("Report path validation failed: {}", e))?;
    }

    if let Some(ref lang) = context.source_language {
        validate_language_code(lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }

    Ok(())
}
