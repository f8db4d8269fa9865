//! recording fake chain shared by the integration tests

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    fs,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use deployer::{
    secrets::MNEMONIC, Connector, DeployError, DeployInputs, InstantiateRequest,
    InstantiateResult, NetworkConfig, Secrets, UploadResult, Wallet, WasmSigner,
};

pub const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

pub const TOKEN_WASM: &[u8] = b"\0asm token contract";
pub const DUEL_WASM: &[u8] = b"\0asm duel platform contract";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect { address: String },
    Upload(Vec<u8>),
    Instantiate(InstantiateRequest),
}

/// in-memory chain that records every call made against it
#[derive(Clone)]
pub struct FakeChain {
    calls: Arc<Mutex<Vec<Call>>>,
    code_ids: Arc<Mutex<VecDeque<Option<u64>>>>,
    contracts: Arc<Mutex<u64>>,
    reachable: bool,
}

impl FakeChain {
    pub fn new() -> Self {
        Self {
            calls: Arc::default(),
            code_ids: Arc::default(),
            contracts: Arc::default(),
            reachable: true,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// code ids handed out by successive uploads, 42 once exhausted
    pub fn with_code_ids(self, code_ids: impl IntoIterator<Item = Option<u64>>) -> Self {
        self.code_ids.lock().unwrap().extend(code_ids);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub struct FakeSigner {
    chain: FakeChain,
    address: String,
}

#[async_trait]
impl Connector for FakeChain {
    type Signer = FakeSigner;

    async fn connect(
        &self,
        network: &NetworkConfig,
        wallet: Wallet,
    ) -> Result<Self::Signer, DeployError> {
        let address = wallet.address().to_string();
        self.record(Call::Connect {
            address: address.clone(),
        });

        if !self.reachable {
            return Err(DeployError::Network(format!(
                "{} is unreachable",
                network.rpc_url
            )));
        }

        Ok(FakeSigner {
            chain: self.clone(),
            address,
        })
    }
}

#[async_trait]
impl WasmSigner for FakeSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn upload(&self, wasm_byte_code: Vec<u8>) -> Result<UploadResult, DeployError> {
        self.chain.record(Call::Upload(wasm_byte_code));

        let code_id = self
            .chain
            .code_ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Some(42));

        Ok(UploadResult {
            code_id,
            transaction_hash: "UPLOADHASH".to_string(),
            checksum: "00".to_string(),
            logs: "store_code failed".to_string(),
        })
    }

    async fn instantiate(
        &self,
        request: InstantiateRequest,
    ) -> Result<InstantiateResult, DeployError> {
        self.chain.record(Call::Instantiate(request.clone()));

        if request.code_id == 0 {
            return Err(DeployError::Chain("invalid code id".to_string()));
        }

        let mut contracts = self.chain.contracts.lock().unwrap();
        *contracts += 1;

        Ok(InstantiateResult {
            contract_address: format!("archway1contract{}", *contracts),
            transaction_hash: format!("INSTANTIATEHASH{}", *contracts),
        })
    }
}

pub fn test_inputs(test: &str) -> DeployInputs {
    let dir = std::env::temp_dir().join(format!(
        "enigma-deployer-{test}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();

    let mut inputs = DeployInputs::default();
    inputs.token.artifact = dir.join("test_edt.wasm");
    inputs.duel.artifact = dir.join("enigmaduel.wasm");
    fs::write(&inputs.token.artifact, TOKEN_WASM).unwrap();
    fs::write(&inputs.duel.artifact, DUEL_WASM).unwrap();

    inputs
}

pub fn secrets() -> Secrets {
    Secrets::from_vars([(MNEMONIC, TEST_MNEMONIC)])
}

pub fn deployer_address() -> String {
    Wallet::from_mnemonic(TEST_MNEMONIC, "archway")
        .unwrap()
        .address()
        .to_string()
}

pub fn instantiate_requests(calls: &[Call]) -> Vec<InstantiateRequest> {
    calls
        .iter()
        .filter_map(|call| match call {
            Call::Instantiate(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}
