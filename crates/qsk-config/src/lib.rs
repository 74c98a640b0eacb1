//! qsk-config
//!
//! Layered YAML run configuration.
//!
//! Documents merge in order (earlier docs are base, later docs override),
//! the effective config is serialized to canonical JSON, and a SHA-256
//! hash of that serialization identifies the configuration in logs and
//! reports. Same layers in, same hash out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

/// Effective configuration plus its canonical identity.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    // Merge YAML docs in order: earlier docs are base, later docs override.
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    let canonical_json =
        serde_json::to_string(&merged).context("canonical json serialize failed")?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    hex::encode(out)
}

/// Typed view of the `run` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Registry name of the algorithm to run.
    pub algorithm: Option<String>,
    /// CSV file with the daily bars to replay.
    pub data_csv: Option<PathBuf>,
}

impl RunConfig {
    /// Extract the `run` section from an effective config.
    ///
    /// An absent section is not an error; CLI flags can supply everything.
    pub fn from_loaded(loaded: &LoadedConfig) -> Result<Self> {
        match loaded.config_json.pointer("/run") {
            Some(section) => {
                serde_json::from_value(section.clone()).context("invalid 'run' config section")
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_section_extracts_typed_fields() {
        let loaded = load_layered_yaml_from_strings(&[r#"
run:
  algorithm: benchmark_override_check
  data_csv: data/spy.csv
"#])
        .unwrap();

        let run = RunConfig::from_loaded(&loaded).unwrap();
        assert_eq!(run.algorithm.as_deref(), Some("benchmark_override_check"));
        assert_eq!(run.data_csv, Some(PathBuf::from("data/spy.csv")));
    }

    #[test]
    fn missing_run_section_defaults() {
        let loaded = load_layered_yaml_from_strings(&["{}"]).unwrap();
        let run = RunConfig::from_loaded(&loaded).unwrap();
        assert_eq!(run, RunConfig::default());
    }

    #[test]
    fn unknown_field_type_is_an_error() {
        let loaded = load_layered_yaml_from_strings(&[r#"
run:
  algorithm: [not, a, string]
"#])
        .unwrap();
        assert!(RunConfig::from_loaded(&loaded).is_err());
    }
}
