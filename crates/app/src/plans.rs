use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{AppError, Result};
use metron_core::PlanRegistry;

/// Resolve the plan registry for this deployment: the defaults file wins
/// when present, otherwise the built-in quotas are used and written out
/// so operators can see and edit them.
pub fn sync_plan_defaults(path: &Path) -> Result<PlanRegistry> {
    if path.exists() {
        return load_plan_defaults(path);
    }
    let registry = load_initial_plans()?;
    write_plan_defaults(path, &registry)?;
    Ok(registry)
}

pub fn load_plan_defaults(path: &Path) -> Result<PlanRegistry> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(AppError::from)
}

pub fn load_initial_plans() -> Result<PlanRegistry> {
    let data = include_str!("../plan-defaults.json");
    serde_json::from_str(data).map_err(AppError::from)
}

pub fn write_plan_defaults(path: &Path, registry: &PlanRegistry) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, registry).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_parse() {
        let registry = load_initial_plans().expect("builtin plans");
        assert_eq!(registry, PlanRegistry::default());
    }

    #[test]
    fn sync_creates_then_reads_the_defaults_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plans.json");

        let created = sync_plan_defaults(&path).expect("sync");
        assert_eq!(created, PlanRegistry::default());
        assert!(path.exists());

        let edited = PlanRegistry {
            free: 5,
            starter: 50,
            professional: 500,
        };
        write_plan_defaults(&path, &edited).expect("write");
        assert_eq!(sync_plan_defaults(&path).expect("sync"), edited);
    }
}
