//! Compiled contract artifact loading
//!
//! Reads Foundry build output (`out/<Name>.sol/<Name>.json`) and exposes the
//! ABI plus creation bytecode. Artifacts are produced by an external build
//! step and are never mutated here.

use alloy::primitives::Bytes;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::DeployError;

/// Raw artifact file shape. Foundry writes `bytecode` as an object with an
/// `object` field; plain `{ "abi": …, "bytecode": "0x…" }` artifacts are
/// accepted too.
#[derive(Debug, Deserialize)]
struct RawArtifact {
    abi: serde_json::Value,
    bytecode: RawBytecode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Plain(String),
    Object { object: String },
}

impl RawBytecode {
    fn hex(&self) -> &str {
        match self {
            RawBytecode::Plain(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

/// A compiled contract ready for deployment.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    /// Contract name the artifact was loaded for
    pub contract_name: String,
    /// Parsed ABI (kept for validation and tooling; calls go through typed
    /// bindings)
    pub abi: serde_json::Value,
    /// Creation bytecode
    pub bytecode: Bytes,
}

impl CompiledArtifact {
    /// Load `<artifacts_dir>/<Name>.sol/<Name>.json`.
    pub fn load(artifacts_dir: &Path, contract_name: &str) -> Result<Self, DeployError> {
        let path = artifact_path(artifacts_dir, contract_name);
        Self::from_file(&path, contract_name)
    }

    /// Load an artifact from an explicit path.
    pub fn from_file(path: &Path, contract_name: &str) -> Result<Self, DeployError> {
        let content = std::fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
        let raw: RawArtifact =
            serde_json::from_str(&content).map_err(|e| DeployError::parse(path, e))?;

        match raw.abi.as_array() {
            Some(items) if !items.is_empty() => {}
            _ => {
                return Err(DeployError::Artifact {
                    path: path.to_path_buf(),
                    reason: "abi is missing or empty".to_string(),
                })
            }
        }

        let bytecode = decode_bytecode(path, raw.bytecode.hex())?;

        Ok(Self {
            contract_name: contract_name.to_string(),
            abi: raw.abi,
            bytecode,
        })
    }

    /// Creation code with ABI-encoded constructor args appended.
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Bytes {
        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(constructor_args);
        code.into()
    }
}

/// Foundry output layout: `out/MessageSender.sol/MessageSender.json`
fn artifact_path(artifacts_dir: &Path, contract_name: &str) -> PathBuf {
    artifacts_dir
        .join(format!("{}.sol", contract_name))
        .join(format!("{}.json", contract_name))
}

fn decode_bytecode(path: &Path, hex_str: &str) -> Result<Bytes, DeployError> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if stripped.is_empty() {
        return Err(DeployError::Artifact {
            path: path.to_path_buf(),
            reason: "bytecode is empty".to_string(),
        });
    }
    let bytes = hex::decode(stripped).map_err(|e| DeployError::Artifact {
        path: path.to_path_buf(),
        reason: format!("bytecode is not valid hex: {}", e),
    })?;
    Ok(bytes.into())
}
