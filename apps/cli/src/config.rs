use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_PORT: u16 = 3860;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub port: u16,
    pub service_token: String,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub paths: ConfigPaths,
    pub created: bool,
}

/// Load the server config from the data dir, creating it on first run.
/// The service token is minted once at creation so the tool handlers and
/// the billing webhook keep working across restarts.
pub fn load_or_create(data_dir: &Path) -> Result<ConfigLoad, String> {
    let file = data_dir.join(CONFIG_FILE_NAME);
    let paths = ConfigPaths { file };

    if paths.file.exists() {
        let contents = fs::read_to_string(&paths.file)
            .map_err(|err| format!("read config {}: {}", paths.file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", paths.file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            paths,
            created: false,
        });
    }

    let config = CliConfig {
        port: DEFAULT_PORT,
        service_token: http_api::generate_service_token(),
    };
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&paths.file, contents)
        .map_err(|err| format!("write config {}: {}", paths.file.display(), err))?;

    Ok(ConfigLoad {
        config,
        paths,
        created: true,
    })
}
