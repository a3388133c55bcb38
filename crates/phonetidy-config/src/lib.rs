use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonetidy";
const CONFIG_FILENAME: &str = "config.toml";

const ENV_DB_HOST: &str = "PHONETIDY_DB_HOST";
const ENV_DB_PORT: &str = "PHONETIDY_DB_PORT";
const ENV_DB_USER: &str = "PHONETIDY_DB_USER";
const ENV_DB_PASSWORD: &str = "PHONETIDY_DB_PASSWORD";
const ENV_DB_NAME: &str = "PHONETIDY_DB_NAME";

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "postgres";
pub const DEFAULT_DB_NAME: &str = "phone";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            dbname: DEFAULT_DB_NAME.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid {0} value: not unicode")]
    InvalidEnvValue(&'static str),
    #[error("invalid database port: {0}")]
    InvalidPort(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database: Option<DatabaseFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseFile {
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    dbname: Option<String>,
}

// Precedence: built-in defaults, then the config file, then the
// PHONETIDY_DB_* environment overrides.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let mut config = match resolve_config_path(config_path) {
        Ok(path) => load_at_path(&path, required)?.unwrap_or_default(),
        Err(ConfigError::MissingHomeDir) if !required => AppConfig::default(),
        Err(ConfigError::InvalidConfigPath(_)) if !required => AppConfig::default(),
        Err(err) => return Err(err),
    };
    env_overrides(&mut config.database)?;
    Ok(config)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)))
}

fn merge_config(parsed: ConfigFile) -> AppConfig {
    let mut config = AppConfig::default();

    if let Some(database) = parsed.database {
        if let Some(host) = database.host {
            config.database.host = host;
        }
        if let Some(port) = database.port {
            config.database.port = port;
        }
        if let Some(user) = database.user {
            config.database.user = user;
        }
        if let Some(password) = database.password {
            config.database.password = password;
        }
        if let Some(dbname) = database.dbname {
            config.database.dbname = dbname;
        }
    }

    config
}

pub fn env_overrides(config: &mut DatabaseConfig) -> Result<()> {
    if let Some(host) = env_value(ENV_DB_HOST)? {
        config.host = host;
    }
    if let Some(port) = env_value(ENV_DB_PORT)? {
        config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
    }
    if let Some(user) = env_value(ENV_DB_USER)? {
        config.user = user;
    }
    if let Some(password) = env_value(ENV_DB_PASSWORD)? {
        config.password = password;
    }
    if let Some(dbname) = env_value(ENV_DB_NAME)? {
        config.dbname = dbname;
    }
    Ok(())
}

fn env_value(name: &'static str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvValue(name)),
    }
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
