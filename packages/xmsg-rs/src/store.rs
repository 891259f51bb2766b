//! Deployed-contract record store and deploy journal
//!
//! The record file is a flat JSON object keyed by chain name; each entry maps
//! contract roles to addresses plus a `deployedAt` timestamp. It is the single
//! source of truth for "what address to call next": one chain's entry is
//! appended or overwritten per run, prior entries are never deleted.
//!
//! Saves go through a temp-file-and-rename cycle so a crash mid-write cannot
//! leave a half-written record. Concurrent writers are unsupported: the tool
//! assumes single-writer discipline, the rename only guards against torn
//! writes.
//!
//! The journal is an append-only commit log kept next to the record file. An
//! entry is written in phase `submitted` before a transaction goes out,
//! `confirmed` once the receipt is in, and `recorded` after the record file
//! write, so a crash between on-chain effect and record write leaves a
//! visible unresolved entry instead of silently losing the deployment.

use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::chains::ChainName;
use crate::error::DeployError;

/// One chain's entry in the record file: contract role -> address, plus the
/// timestamp of the last deployment that touched the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDeployments {
    #[serde(rename = "deployedAt")]
    pub deployed_at: DateTime<Utc>,
    /// Contract role -> deployed address ("MessageSender": "0x…")
    #[serde(flatten)]
    pub contracts: BTreeMap<String, Address>,
}

/// The deployed-contract record store.
///
/// The record file must pre-exist (seed it with `{}`); a missing or
/// malformed file is an error, there is no bootstrap path.
#[derive(Debug)]
pub struct DeploymentStore {
    path: PathBuf,
    entries: BTreeMap<String, ChainDeployments>,
}

impl DeploymentStore {
    /// Load the record file.
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let content = std::fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
        let entries: BTreeMap<String, ChainDeployments> =
            serde_json::from_str(&content).map_err(|e| DeployError::parse(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Upsert one chain's entry, preserving every other chain's entry.
    pub fn record(
        &mut self,
        chain: ChainName,
        role: &str,
        address: Address,
        deployed_at: DateTime<Utc>,
    ) {
        let entry = self
            .entries
            .entry(chain.as_str().to_string())
            .or_insert_with(|| ChainDeployments {
                deployed_at,
                contracts: BTreeMap::new(),
            });
        entry.contracts.insert(role.to_string(), address);
        entry.deployed_at = deployed_at;
    }

    /// Look up a recorded address.
    pub fn address_of(&self, chain: ChainName, role: &str) -> Option<Address> {
        self.entries
            .get(chain.as_str())
            .and_then(|e| e.contracts.get(role))
            .copied()
    }

    /// Look up a recorded address, failing if it is absent.
    ///
    /// This is the fail-fast accessor: scripts that need a cross-chain
    /// address call it before touching the network.
    pub fn require_address(&self, chain: ChainName, role: &str) -> Result<Address, DeployError> {
        self.address_of(chain, role)
            .ok_or_else(|| DeployError::MissingDeployment {
                chain,
                role: role.to_string(),
            })
    }

    /// Write the record back as pretty-printed JSON via temp file + rename.
    pub fn save(&self) -> Result<(), DeployError> {
        write_json_atomic(&self.path, &self.entries)
    }

    /// Iterate all entries (chain key, entry), for status display.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ChainDeployments)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lifecycle phase of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Submitted,
    Confirmed,
    Recorded,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Submitted => "submitted",
            Phase::Confirmed => "confirmed",
            Phase::Recorded => "recorded",
        }
    }
}

/// One line of the deploy journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub chain: ChainName,
    /// What was submitted: a contract role ("MessageSender") or a call
    /// ("MessageSender.sendMessage")
    pub operation: String,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub at: DateTime<Utc>,
}

/// Append-only two-phase commit log for deployments and sends.
#[derive(Debug)]
pub struct DeployJournal {
    path: PathBuf,
    entries: Vec<JournalEntry>,
}

impl DeployJournal {
    /// Open the journal, starting empty if the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self, DeployError> {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| DeployError::parse(path, e))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(DeployError::io(path, e)),
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Record that a transaction is about to be submitted.
    pub fn submitted(&mut self, chain: ChainName, operation: &str) -> Result<(), DeployError> {
        self.append(chain, operation, Phase::Submitted, None, None)
    }

    /// Record an on-chain confirmation.
    pub fn confirmed(
        &mut self,
        chain: ChainName,
        operation: &str,
        tx_hash: &str,
        address: Option<Address>,
    ) -> Result<(), DeployError> {
        self.append(
            chain,
            operation,
            Phase::Confirmed,
            Some(tx_hash.to_string()),
            address,
        )
    }

    /// Record that the operation's result reached the record file (or, for
    /// sends, that the run completed).
    pub fn recorded(&mut self, chain: ChainName, operation: &str) -> Result<(), DeployError> {
        self.append(chain, operation, Phase::Recorded, None, None)
    }

    fn append(
        &mut self,
        chain: ChainName,
        operation: &str,
        phase: Phase,
        tx_hash: Option<String>,
        address: Option<Address>,
    ) -> Result<(), DeployError> {
        self.entries.push(JournalEntry {
            chain,
            operation: operation.to_string(),
            phase,
            tx_hash,
            address,
            at: Utc::now(),
        });
        write_json_atomic(&self.path, &self.entries)
    }

    /// Operations whose latest phase is not `recorded`.
    ///
    /// A lingering `submitted` means a transaction may or may not have
    /// landed; a lingering `confirmed` means an on-chain effect exists that
    /// the record file does not know about. Both need manual attention.
    pub fn unresolved(&self) -> Vec<&JournalEntry> {
        let mut latest: BTreeMap<(ChainName, &str), &JournalEntry> = BTreeMap::new();
        for entry in &self.entries {
            latest.insert((entry.chain, entry.operation.as_str()), entry);
        }
        latest
            .into_values()
            .filter(|e| e.phase != Phase::Recorded)
            .collect()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), DeployError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| DeployError::parse(path, e))?;

    // Temp file in the same directory so the rename stays on one filesystem
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, json.as_bytes()).map_err(|e| DeployError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| DeployError::io(path, e))?;
    Ok(())
}
