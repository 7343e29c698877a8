mod app_config;

pub use app_config::{
    AppConfig, AuthSettings, CompletionSettings, GeocodingSettings, LogFormat, LoggingConfig,
    SearchSettings, ServerConfig, StorageBackend, StorageSettings,
};
