/// Settings of one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Renders for this platform instead of the one configured on the project.
    pub platform_override: Option<String>,
    pub language: String,
    pub description: String,
    /// Hands out sequential ids instead of random ones, making runs repeatable.
    pub deterministic_ids: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            platform_override: None,
            language: "en".to_string(),
            description: String::new(),
            deterministic_ids: false,
        }
    }
}

impl ExportOptions {
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform_override = Some(platform.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_deterministic_ids(mut self, deterministic: bool) -> Self {
        self.deterministic_ids = deterministic;
        self
    }
}
