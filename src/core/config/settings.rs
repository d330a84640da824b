use std::path::Path;

use super::parsing::{env_flag, env_optional, env_or_default, parse_cors_origins, parse_u64};
use super::types::{
    Cli, ConfigError, CorsSettings, ServerHost, ServerPort, ServerSettings, Settings,
    StorageSettings, TelemetrySettings,
};

impl Settings {
    /// Combines the required command line flags with optional environment tuning.
    pub(crate) fn load(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.cache.as_os_str().is_empty() {
            return Err(ConfigError::EmptyCacheDir);
        }

        let max_upload_size_mb =
            parse_u64("MAX_UPLOAD_SIZE_MB", env_or_default("MAX_UPLOAD_SIZE_MB", "10"))?;
        if max_upload_size_mb == 0 {
            return Err(ConfigError::InvalidValue {
                field: "MAX_UPLOAD_SIZE_MB",
                value: max_upload_size_mb.to_string(),
            });
        }

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        Ok(Self {
            server: ServerSettings {
                host: ServerHost::parse(cli.host.clone())?,
                port: ServerPort::parse(cli.port.clone())?,
            },
            storage: StorageSettings {
                cache_dir: cli.cache.clone(),
                max_upload_size_mb,
                report_photo_mime: env_flag("INVENTORY_REPORT_PHOTO_MIME"),
            },
            cors: CorsSettings { origins: cors_origins },
            telemetry: TelemetrySettings {
                log_level: env_or_default("INVENTORY_LOG_LEVEL", "info"),
                json: env_flag("INVENTORY_LOG_JSON"),
                prometheus_enabled: env_flag("PROMETHEUS_ENABLED"),
            },
        })
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn cache_dir(&self) -> &Path {
        &self.storage.cache_dir
    }

    pub(crate) fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn max_upload_bytes(&self) -> usize {
        (self.storage.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }
}
