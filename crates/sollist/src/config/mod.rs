use std::env;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// How reports are rendered by the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidOutputFormat(value.to_string())),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let output = match env::var("SOLLIST_OUTPUT") {
            Ok(value) => OutputFormat::parse(&value)?,
            Err(_) => OutputFormat::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            report: ReportConfig { output },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    /// Command-line verbosity; `RUST_LOG` still wins when set.
    pub fn apply_verbosity(&mut self, verbose: u8) {
        match verbose {
            0 => {}
            1 => self.log_level = "sollist=debug,info".to_string(),
            _ => self.log_level = "trace".to_string(),
        }
    }
}

/// Report rendering defaults; command-line flags take precedence.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("SOLLIST_OUTPUT must be `text` or `json`, got `{0}`")]
    InvalidOutputFormat(String),
}
