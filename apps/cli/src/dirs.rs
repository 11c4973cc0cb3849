use std::env;
use std::path::PathBuf;

pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, String> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    if let Ok(dir) = env::var("METRON_DATA_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".metron"))
}
