use std::path::{Path, PathBuf};

use cosmwasm_std::Uint128;
use serde::{Deserialize, Serialize};

pub const TOKEN_LABEL: &str = "EDT_init";
pub const DUEL_LABEL: &str = "Enigma_init";

/// code ids produced by the store step. persisted so that the
/// instantiation step can run on its own later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeIds {
    pub token: u64,
    pub duel: u64,
}

/// addresses of the instantiated contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantiationOutputs {
    pub token: String,
    pub duel: String,
}

/// init message of the duel platform contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelInstantiateMsg {
    /// fee charged on every finished game room
    pub fee: Uint128,
    /// fee collector and platform admin
    pub admin: String,
    /// cw20 token the platform settles in
    pub enigma_token_duel: String,
}

pub fn workspace_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("failed to cd to workspace root dir")
        .to_path_buf()
}

pub fn artifacts_dir() -> PathBuf {
    workspace_dir().join("artifacts")
}

pub fn deployer_dir() -> PathBuf {
    workspace_dir().join("deployer")
}
