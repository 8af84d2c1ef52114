use std::path::Path;

use crate::error::{FuncTestError, Result};
use crate::scenario::scenario_model::Scenario;

/// Load scenarios from a single YAML file or a directory of YAML files.
pub fn load_scenarios(path: &str) -> Result<Vec<Scenario>> {
    let metadata = std::fs::metadata(path).map_err(|e| FuncTestError::Io {
        context: format!("stat {}", path),
        source: e,
    })?;

    if !metadata.is_dir() {
        return Ok(vec![load_scenario_file(Path::new(path))?]);
    }

    let entries = std::fs::read_dir(path).map_err(|e| FuncTestError::Io {
        context: format!("read dir {}", path),
        source: e,
    })?;

    let mut scenarios = Vec::new();
    for entry in entries {
        let p = entry
            .map_err(|e| FuncTestError::Io {
                context: format!("read dir {}", path),
                source: e,
            })?
            .path();
        if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            scenarios.push(load_scenario_file(&p)?);
        }
    }
    // Sort by name for deterministic order
    scenarios.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scenarios)
}

fn load_scenario_file(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path).map_err(|e| FuncTestError::Io {
        context: format!("read {}", path.display()),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| FuncTestError::Yaml {
        context: path.display().to_string(),
        source: e,
    })
}

/// Keep only scenarios named in `only`; an empty filter keeps everything.
pub fn filter_scenarios(scenarios: Vec<Scenario>, only: &[String]) -> Vec<Scenario> {
    if only.is_empty() {
        return scenarios;
    }
    scenarios
        .into_iter()
        .filter(|s| only.iter().any(|name| name == &s.name))
        .collect()
}
