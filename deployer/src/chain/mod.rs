mod archway;
mod events;
mod fees;

pub use archway::{ArchwayClient, ArchwayConnector};

use async_trait::async_trait;
use cosmwasm_std::Coin;

use crate::{error::DeployError, steps::NetworkConfig, wallet::Wallet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// `None` when the committed tx carried no `store_code` event
    pub code_id: Option<u64>,
    pub transaction_hash: String,
    /// hex encoded sha256 of the uploaded bytecode
    pub checksum: String,
    pub logs: String,
}

impl UploadResult {
    /// the code id, if the upload produced a usable one
    pub fn stored_code_id(&self) -> Option<u64> {
        self.code_id.filter(|id| *id != 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstantiateRequest {
    pub code_id: u64,
    pub label: String,
    pub msg: serde_json::Value,
    pub memo: String,
    pub funds: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiateResult {
    pub contract_address: String,
    pub transaction_hash: String,
}

/// a connection able to sign and submit wasm transactions on behalf
/// of a single account
#[async_trait]
pub trait WasmSigner {
    /// bech32 address of the signing account
    fn address(&self) -> &str;

    async fn upload(&self, wasm_byte_code: Vec<u8>) -> Result<UploadResult, DeployError>;

    async fn instantiate(
        &self,
        request: InstantiateRequest,
    ) -> Result<InstantiateResult, DeployError>;
}

/// opens a [`WasmSigner`] bound to a network endpoint and wallet
#[async_trait]
pub trait Connector {
    type Signer: WasmSigner + Send + Sync;

    async fn connect(
        &self,
        network: &NetworkConfig,
        wallet: Wallet,
    ) -> Result<Self::Signer, DeployError>;
}
