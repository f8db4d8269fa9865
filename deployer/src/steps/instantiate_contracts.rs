use common::{CodeIds, DuelInstantiateMsg, InstantiationOutputs};
use cw20::{Cw20Coin, MinterResponse};
use log::info;
use serde::Serialize;

use crate::{
    chain::{InstantiateRequest, InstantiateResult, WasmSigner},
    error::DeployError,
    steps::{DeployInputs, DuelInputs, TokenInputs},
};

const INSTANTIATE_CONTRACTS: &str = "INSTANTIATE_CONTRACTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiatedContracts {
    pub token: InstantiateResult,
    pub duel: InstantiateResult,
}

impl InstantiatedContracts {
    pub fn outputs(&self) -> InstantiationOutputs {
        InstantiationOutputs {
            token: self.token.contract_address.clone(),
            duel: self.duel.contract_address.clone(),
        }
    }
}

/// cw20 init message. the initial balance goes to the beneficiary when one
/// is configured, to the deployer otherwise; the deployer is the minter.
pub fn token_instantiate_msg(
    inputs: &TokenInputs,
    deployer: &str,
    beneficiary: Option<&str>,
) -> cw20_base::msg::InstantiateMsg {
    cw20_base::msg::InstantiateMsg {
        name: inputs.name.clone(),
        symbol: inputs.symbol.clone(),
        decimals: inputs.decimals,
        initial_balances: vec![Cw20Coin {
            address: beneficiary.unwrap_or(deployer).to_string(),
            amount: inputs.initial_balance,
        }],
        mint: Some(MinterResponse {
            minter: deployer.to_string(),
            cap: inputs.mint_cap,
        }),
        marketing: None,
    }
}

pub fn duel_instantiate_msg(inputs: &DuelInputs, deployer: &str, token: &str) -> DuelInstantiateMsg {
    DuelInstantiateMsg {
        fee: inputs.fee,
        admin: deployer.to_string(),
        enigma_token_duel: token.to_string(),
    }
}

fn to_json<T: Serialize>(msg: &T, label: &str) -> Result<serde_json::Value, DeployError> {
    serde_json::to_value(msg)
        .map_err(|e| DeployError::Config(format!("failed to encode init msg for {label}: {e}")))
}

pub async fn instantiate_token<S>(
    signer: &S,
    code_id: u64,
    inputs: &TokenInputs,
    beneficiary: Option<&str>,
) -> Result<InstantiateResult, DeployError>
where
    S: WasmSigner + Sync + ?Sized,
{
    info!(target: INSTANTIATE_CONTRACTS, "instantiating {} token from code id {code_id}...", inputs.symbol);

    let msg = token_instantiate_msg(inputs, signer.address(), beneficiary);
    let result = signer
        .instantiate(InstantiateRequest {
            code_id,
            label: inputs.label.clone(),
            msg: to_json(&msg, &inputs.label)?,
            memo: inputs.memo.clone(),
            funds: inputs.funds.clone(),
        })
        .await?;

    info!(
        target: INSTANTIATE_CONTRACTS,
        "Instantiation edt successful: {}", result.transaction_hash
    );
    info!(target: INSTANTIATE_CONTRACTS, "token contract: {}", result.contract_address);

    Ok(result)
}

pub async fn instantiate_duel<S>(
    signer: &S,
    code_id: u64,
    inputs: &DuelInputs,
    token_address: &str,
) -> Result<InstantiateResult, DeployError>
where
    S: WasmSigner + Sync + ?Sized,
{
    info!(target: INSTANTIATE_CONTRACTS, "instantiating duel platform from code id {code_id}...");

    let msg = duel_instantiate_msg(inputs, signer.address(), token_address);
    let result = signer
        .instantiate(InstantiateRequest {
            code_id,
            label: inputs.label.clone(),
            msg: to_json(&msg, &inputs.label)?,
            memo: inputs.memo.clone(),
            funds: inputs.funds.clone(),
        })
        .await?;

    info!(
        target: INSTANTIATE_CONTRACTS,
        "Instantiation enigma successful: {}", result.transaction_hash
    );
    info!(target: INSTANTIATE_CONTRACTS, "duel contract: {}", result.contract_address);

    Ok(result)
}

/// instantiates both contracts from previously stored codes. the duel
/// contract is pointed at the token contract created here.
pub async fn instantiate_contracts<S>(
    signer: &S,
    inputs: &DeployInputs,
    code_ids: CodeIds,
    beneficiary: Option<&str>,
) -> Result<InstantiatedContracts, DeployError>
where
    S: WasmSigner + Sync + ?Sized,
{
    info!(target: INSTANTIATE_CONTRACTS, "instantiating contracts as {}...", signer.address());

    let token = instantiate_token(signer, code_ids.token, &inputs.token, beneficiary).await?;
    let duel = instantiate_duel(signer, code_ids.duel, &inputs.duel, &token.contract_address).await?;

    Ok(InstantiatedContracts { token, duel })
}
