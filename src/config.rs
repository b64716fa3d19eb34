use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub shutdown_grace: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Every key is optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = env_or("DATABASE_URL", "sqlite://questionnaire.db");

        let host: IpAddr = env_or("QUESTIONNAIRE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid QUESTIONNAIRE_HOST: {e}"))?;

        let port: u16 = env_or("QUESTIONNAIRE_PORT", "8080")
            .parse()
            .map_err(|e| format!("Invalid QUESTIONNAIRE_PORT: {e}"))?;

        let static_dir = Some(env_or("QUESTIONNAIRE_STATIC_DIR", "frontend/build"))
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let max_body_size: usize = env_or("QUESTIONNAIRE_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid QUESTIONNAIRE_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("QUESTIONNAIRE_DB_MAX_CONNECTIONS", "5")
            .parse()
            .map_err(|e| format!("Invalid QUESTIONNAIRE_DB_MAX_CONNECTIONS: {e}"))?;
        if db_max_connections == 0 {
            return Err("Invalid QUESTIONNAIRE_DB_MAX_CONNECTIONS: must be at least 1".to_string());
        }

        let shutdown_grace_secs: u64 = env_or("QUESTIONNAIRE_SHUTDOWN_GRACE_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid QUESTIONNAIRE_SHUTDOWN_GRACE_SECS: {e}"))?;

        let log_level = env_or("QUESTIONNAIRE_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            static_dir,
            max_body_size,
            db_max_connections,
            shutdown_grace: Duration::from_secs(shutdown_grace_secs),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://questionnaire.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, Some(PathBuf::from("frontend/build")));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.shutdown_grace, Duration::from_secs(10));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn empty_static_dir_disables_assets() {
        let config = load(&[("QUESTIONNAIRE_STATIC_DIR", "")]).unwrap();
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn rejects_bad_port() {
        let err = load(&[("QUESTIONNAIRE_PORT", "eighty")]).unwrap_err();
        assert!(err.contains("QUESTIONNAIRE_PORT"));
    }

    #[test]
    fn rejects_empty_pool() {
        let err = load(&[("QUESTIONNAIRE_DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(err.contains("at least 1"));
    }
}
