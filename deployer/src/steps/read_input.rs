use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use common::{DUEL_LABEL, TOKEN_LABEL};
use cosmwasm_std::{Coin, Uint128};
use log::info;
use serde::Deserialize;

use crate::{consts::*, error::DeployError};

const READ_INPUTS: &str = "READ_INPUTS";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeployInputs {
    pub network: NetworkConfig,
    pub token: TokenInputs,
    pub duel: DuelInputs,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub rpc_url: String,
    pub address_prefix: String,
    pub fee_denom: String,
    /// fee paid per gas unit, in `fee_denom`. when unset the price is
    /// read from the chain's rewards module before every transaction.
    pub gas_price: Option<u64>,
    /// multiplier applied to simulated gas
    pub gas_adjustment: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: CHAIN_ID.to_string(),
            rpc_url: RPC_URL.to_string(),
            address_prefix: ADDRESS_PREFIX.to_string(),
            fee_denom: FEE_DENOM.to_string(),
            gas_price: None,
            gas_adjustment: GAS_ADJUSTMENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenInputs {
    pub artifact: PathBuf,
    pub label: String,
    pub memo: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_balance: Uint128,
    pub mint_cap: Option<Uint128>,
    pub funds: Vec<Coin>,
}

impl Default for TokenInputs {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from(TOKEN_ARTIFACT),
            label: TOKEN_LABEL.to_string(),
            memo: TOKEN_MEMO.to_string(),
            name: "Enigma Duel Token".to_string(),
            symbol: "EDT".to_string(),
            decimals: 9,
            initial_balance: Uint128::new(10_000_000_000),
            mint_cap: Some(Uint128::new(100_000_000_000)),
            funds: vec![Coin::new(INSTANTIATE_FUNDS, FEE_DENOM)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DuelInputs {
    pub artifact: PathBuf,
    pub label: String,
    pub memo: String,
    pub fee: Uint128,
    pub funds: Vec<Coin>,
}

impl Default for DuelInputs {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from(DUEL_ARTIFACT),
            label: DUEL_LABEL.to_string(),
            memo: DUEL_MEMO.to_string(),
            fee: Uint128::new(100_000_000),
            funds: vec![Coin::new(INSTANTIATE_FUNDS, FEE_DENOM)],
        }
    }
}

impl DeployInputs {
    pub fn validate(&self) -> Result<(), DeployError> {
        let network = &self.network;
        if network.chain_id.is_empty() || network.address_prefix.is_empty() {
            return Err(DeployError::Config(
                "chain_id and address_prefix must not be empty".to_string(),
            ));
        }
        if !network.gas_adjustment.is_finite() || network.gas_adjustment < 1.0 {
            return Err(DeployError::Config(format!(
                "gas_adjustment must be at least 1.0, got {}",
                network.gas_adjustment
            )));
        }
        if same_file(&self.token.artifact, &self.duel.artifact) {
            return Err(DeployError::Config(format!(
                "token and duel artifacts both point at {}",
                self.token.artifact.display()
            )));
        }
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (fs::canonicalize(a), fs::canonicalize(b)) {
        return a == b;
    }

    fn components(path: &Path) -> Vec<Component<'_>> {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<Vec<_>>()
    }
    components(a) == components(b)
}

/// reads the deployment inputs from `input_file`, falling back to the
/// constantine defaults when no file is given.
pub fn read_inputs(input_file: Option<&Path>) -> Result<DeployInputs, DeployError> {
    let inputs = match input_file {
        Some(path) => {
            info!(target: READ_INPUTS, "reading inputs from {}...", path.display());
            let parameters = fs::read_to_string(path).map_err(|e| {
                DeployError::Config(format!("failed to read {}: {e}", path.display()))
            })?;
            parse_inputs(&parameters)?
        }
        None => {
            info!(target: READ_INPUTS, "no inputs file given, using constantine defaults");
            DeployInputs::default()
        }
    };

    inputs.validate()?;
    info!(target: READ_INPUTS, "network inputs: {:?}", inputs.network);

    Ok(inputs)
}

fn parse_inputs(parameters: &str) -> Result<DeployInputs, DeployError> {
    toml::from_str(parameters).map_err(|e| DeployError::Config(format!("malformed inputs: {e}")))
}
