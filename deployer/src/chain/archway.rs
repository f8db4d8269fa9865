use async_trait::async_trait;
use cosmrs::{
    cosmwasm::{MsgInstantiateContract, MsgStoreCode},
    proto::{
        cosmos::{
            auth::v1beta1::{BaseAccount, QueryAccountRequest, QueryAccountResponse},
            tx::v1beta1::{SimulateRequest, SimulateResponse},
        },
        traits::Message,
    },
    rpc::{Client, HttpClient},
    tendermint::chain,
    tx::{self, Fee, Msg, SignDoc, SignerInfo},
    AccountId, Any, Coin,
};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use crate::{
    chain::{
        events,
        fees::{self, GasPrice, QueryEstimateTxFeesRequest, QueryEstimateTxFeesResponse},
        Connector, InstantiateRequest, InstantiateResult, UploadResult, WasmSigner,
    },
    consts::GAS_PRICE,
    error::DeployError,
    steps::NetworkConfig,
    wallet::Wallet,
};

const ARCHWAY_CLIENT: &str = "ARCHWAY_CLIENT";

const ACCOUNT_QUERY_PATH: &str = "/cosmos.auth.v1beta1.Query/Account";
const SIMULATE_PATH: &str = "/cosmos.tx.v1beta1.Service/Simulate";

type TxCommitResponse = cosmrs::rpc::endpoint::broadcast::tx_commit::Response;

/// opens [`ArchwayClient`] connections over tendermint rpc
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchwayConnector;

#[async_trait]
impl Connector for ArchwayConnector {
    type Signer = ArchwayClient;

    async fn connect(
        &self,
        network: &NetworkConfig,
        wallet: Wallet,
    ) -> Result<Self::Signer, DeployError> {
        ArchwayClient::connect(network, wallet).await
    }
}

/// signing client for an archway node. every transaction is simulated for
/// gas, signed in direct mode and broadcast with commit semantics.
pub struct ArchwayClient {
    rpc: HttpClient,
    chain_id: chain::Id,
    network: NetworkConfig,
    wallet: Wallet,
    address: String,
}

impl ArchwayClient {
    pub async fn connect(network: &NetworkConfig, wallet: Wallet) -> Result<Self, DeployError> {
        info!(target: ARCHWAY_CLIENT, "connecting to {}...", network.rpc_url);

        let chain_id: chain::Id = network.chain_id.parse().map_err(|e| {
            DeployError::Config(format!("invalid chain id {}: {e}", network.chain_id))
        })?;

        let rpc = HttpClient::new(network.rpc_url.as_str()).map_err(|e| {
            DeployError::Network(format!("invalid rpc endpoint {}: {e}", network.rpc_url))
        })?;

        let status = rpc.status().await.map_err(|e| {
            DeployError::Network(format!("{} is unreachable: {e}", network.rpc_url))
        })?;
        if status.node_info.network != chain_id {
            return Err(DeployError::Network(format!(
                "{} serves chain {}, expected {chain_id}",
                network.rpc_url, status.node_info.network
            )));
        }

        let address = wallet.address().to_string();
        let client = Self {
            rpc,
            chain_id,
            network: network.clone(),
            wallet,
            address,
        };

        let account = client.account().await?;
        info!(
            target: ARCHWAY_CLIENT,
            "connected to {} as {} (account number {}, sequence {})",
            client.chain_id, client.address, account.account_number, account.sequence
        );

        Ok(client)
    }

    async fn account(&self) -> Result<BaseAccount, DeployError> {
        let request = QueryAccountRequest {
            address: self.address.clone(),
        };

        let response = self
            .rpc
            .abci_query(
                Some(ACCOUNT_QUERY_PATH.to_string()),
                request.encode_to_vec(),
                None,
                false,
            )
            .await
            .map_err(|e| DeployError::Network(format!("account query failed: {e}")))?;

        if response.code.is_err() {
            return Err(DeployError::Network(format!(
                "signer {} is unknown to {}: {}",
                self.address, self.chain_id, response.log
            )));
        }

        let account = QueryAccountResponse::decode(response.value.as_slice())
            .map_err(|e| DeployError::Network(format!("malformed account response: {e}")))?
            .account
            .ok_or_else(|| {
                DeployError::Network(format!("signer {} has no account", self.address))
            })?;

        BaseAccount::decode(account.value.as_slice())
            .map_err(|e| DeployError::Network(format!("malformed account {}: {e}", self.address)))
    }

    fn sign(
        &self,
        body: &tx::Body,
        account: &BaseAccount,
        gas_limit: u64,
        fee_amount: u128,
    ) -> Result<Vec<u8>, DeployError> {
        sign_tx(
            &self.wallet,
            &self.chain_id,
            body,
            account,
            Fee::from_amount_and_gas(fee_coin(fee_amount, &self.network.fee_denom)?, gas_limit),
        )
    }

    /// gas unit price for the next transaction. a price from the inputs
    /// file wins; otherwise the rewards module's minimum consensus fee is
    /// used, falling back to the constantine default if it can't be read.
    async fn gas_price(&self, gas_limit: u64) -> GasPrice {
        if let Some(price) = self.network.gas_price {
            return GasPrice::from_integer(price);
        }

        match self.estimate_gas_price(gas_limit).await {
            Ok(price) => price,
            Err(e) => {
                warn!(
                    target: ARCHWAY_CLIENT,
                    "fee estimate unavailable ({e}), using {GAS_PRICE}{} per gas",
                    self.network.fee_denom
                );
                GasPrice::from_integer(GAS_PRICE)
            }
        }
    }

    async fn estimate_gas_price(&self, gas_limit: u64) -> Result<GasPrice, DeployError> {
        let request = QueryEstimateTxFeesRequest {
            gas_limit,
            contract_address: String::new(),
        };

        let response = self
            .rpc
            .abci_query(
                Some(fees::ESTIMATE_TX_FEES_PATH.to_string()),
                request.encode_to_vec(),
                None,
                false,
            )
            .await
            .map_err(|e| DeployError::Network(format!("fee estimate request failed: {e}")))?;

        if response.code.is_err() {
            return Err(DeployError::Chain(format!(
                "fee estimate failed: {}",
                response.log
            )));
        }

        let estimate = QueryEstimateTxFeesResponse::decode(response.value.as_slice())
            .map_err(|e| DeployError::Network(format!("malformed fee estimate: {e}")))?;

        fees::gas_price(&estimate, &self.network.fee_denom)
    }

    async fn simulate(&self, body: &tx::Body, account: &BaseAccount) -> Result<u64, DeployError> {
        let request = SimulateRequest {
            tx_bytes: self.sign(body, account, 0, 0)?,
            ..Default::default()
        };

        let response = self
            .rpc
            .abci_query(Some(SIMULATE_PATH.to_string()), request.encode_to_vec(), None, false)
            .await
            .map_err(|e| DeployError::Network(format!("simulation request failed: {e}")))?;

        if response.code.is_err() {
            return Err(DeployError::Chain(format!(
                "simulation failed: {}",
                response.log
            )));
        }

        let gas_used = SimulateResponse::decode(response.value.as_slice())
            .map_err(|e| DeployError::Network(format!("malformed simulation response: {e}")))?
            .gas_info
            .map(|info| info.gas_used)
            .ok_or_else(|| DeployError::Chain("simulation returned no gas info".to_string()))?;

        Ok(gas_used)
    }

    async fn submit(&self, msg: Any, memo: &str) -> Result<TxCommitResponse, DeployError> {
        let account = self.account().await?;
        let body = tx::Body::new(vec![msg], memo, 0u32);

        let gas_used = self.simulate(&body, &account).await?;
        let gas_limit = (gas_used as f64 * self.network.gas_adjustment).ceil() as u64;
        let fee_amount = self.gas_price(gas_limit).await.fee(gas_limit)?;
        debug!(
            target: ARCHWAY_CLIENT,
            "simulated {gas_used} gas, limit {gas_limit}, fee {fee_amount}{}",
            self.network.fee_denom
        );

        let tx_bytes = self.sign(&body, &account, gas_limit, fee_amount)?;
        let response = self
            .rpc
            .broadcast_tx_commit(tx_bytes)
            .await
            .map_err(|e| DeployError::Network(format!("broadcast failed: {e}")))?;

        if response.check_tx.code.is_err() {
            return Err(DeployError::Chain(format!(
                "tx {} failed check: {}",
                response.hash, response.check_tx.log
            )));
        }
        if response.tx_result.code.is_err() {
            return Err(DeployError::Chain(format!(
                "tx {} failed execution: {}",
                response.hash, response.tx_result.log
            )));
        }

        Ok(response)
    }

    fn sender(&self) -> AccountId {
        self.wallet.address().clone()
    }
}

#[async_trait]
impl WasmSigner for ArchwayClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn upload(&self, wasm_byte_code: Vec<u8>) -> Result<UploadResult, DeployError> {
        let checksum = hex::encode(Sha256::digest(&wasm_byte_code));
        info!(
            target: ARCHWAY_CLIENT,
            "uploading {} bytes of bytecode (sha256 {checksum})",
            wasm_byte_code.len()
        );

        let msg = MsgStoreCode {
            sender: self.sender(),
            wasm_byte_code,
            instantiate_permission: None,
        }
        .to_any()
        .map_err(|e| DeployError::Chain(format!("failed to encode store code msg: {e}")))?;

        let response = self.submit(msg, "").await?;

        Ok(UploadResult {
            code_id: events::code_id(&response.tx_result.events),
            transaction_hash: response.hash.to_string(),
            checksum,
            logs: response.tx_result.log,
        })
    }

    async fn instantiate(
        &self,
        request: InstantiateRequest,
    ) -> Result<InstantiateResult, DeployError> {
        let msg = instantiate_msg(self.sender(), &request)?
            .to_any()
            .map_err(|e| DeployError::Chain(format!("failed to encode instantiate msg: {e}")))?;

        let response = self.submit(msg, &request.memo).await?;
        let transaction_hash = response.hash.to_string();

        let contract_address = events::contract_address(&response.tx_result.events).ok_or_else(|| {
            DeployError::Chain(format!(
                "tx {transaction_hash} instantiated {} but emitted no contract address",
                request.label
            ))
        })?;

        Ok(InstantiateResult {
            contract_address,
            transaction_hash,
        })
    }
}

/// contracts are instantiated without a wasm admin
fn instantiate_msg(
    sender: AccountId,
    request: &InstantiateRequest,
) -> Result<MsgInstantiateContract, DeployError> {
    if request.code_id == 0 {
        return Err(DeployError::Chain(
            "cannot instantiate from code id 0".to_string(),
        ));
    }

    let funds = request
        .funds
        .iter()
        .map(|coin| Coin::new(coin.amount.u128(), &coin.denom))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DeployError::Config(format!("invalid funds: {e}")))?;

    let msg = serde_json::to_vec(&request.msg).map_err(|e| {
        DeployError::Config(format!("failed to encode init msg for {}: {e}", request.label))
    })?;

    Ok(MsgInstantiateContract {
        sender,
        admin: None,
        code_id: request.code_id,
        label: Some(request.label.clone()),
        msg,
        funds,
    })
}

fn fee_coin(amount: u128, denom: &str) -> Result<Coin, DeployError> {
    Coin::new(amount, denom).map_err(|e| DeployError::Config(format!("invalid fee denom: {e}")))
}

/// signs `body` in direct mode for `account` and returns the encoded tx
fn sign_tx(
    wallet: &Wallet,
    chain_id: &chain::Id,
    body: &tx::Body,
    account: &BaseAccount,
    fee: Fee,
) -> Result<Vec<u8>, DeployError> {
    let auth_info =
        SignerInfo::single_direct(Some(wallet.public_key()), account.sequence).auth_info(fee);

    let sign_doc = SignDoc::new(body, &auth_info, chain_id, account.account_number)
        .map_err(|e| DeployError::Chain(format!("failed to build sign doc: {e}")))?;

    sign_doc
        .sign(&wallet.signing_key())
        .and_then(|raw| raw.to_bytes())
        .map_err(|e| DeployError::Credential(format!("failed to sign transaction: {e}")))
}
