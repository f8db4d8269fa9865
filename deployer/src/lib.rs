//! Deploys the Enigma Duel token and duel platform contracts to an
//! Archway network.
//!
//! The deployment runs strictly in sequence: derive the wallet, connect,
//! then upload and instantiate the token contract before uploading and
//! instantiating the duel platform that references it.

pub mod chain;
mod consts;
pub mod error;
pub mod secrets;
pub mod steps;
pub mod wallet;

use common::CodeIds;
use log::info;

pub use chain::{
    ArchwayClient, ArchwayConnector, Connector, InstantiateRequest, InstantiateResult,
    UploadResult, WasmSigner,
};
pub use error::DeployError;
pub use secrets::Secrets;
pub use steps::{DeployInputs, InstantiatedContracts, NetworkConfig};
pub use wallet::Wallet;

const DEPLOYER: &str = "DEPLOYER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub code_ids: CodeIds,
    pub contracts: InstantiatedContracts,
}

/// derives the deployer wallet and opens a signing connection with it.
/// a missing or malformed mnemonic fails before the network is touched.
pub async fn connect<C>(
    connector: &C,
    network: &NetworkConfig,
    secrets: &Secrets,
) -> Result<C::Signer, DeployError>
where
    C: Connector + Sync + ?Sized,
{
    let wallet = Wallet::from_mnemonic(secrets.mnemonic()?, &network.address_prefix)?;
    info!(target: DEPLOYER, "deployer address: {}", wallet.address());

    connector.connect(network, wallet).await
}

/// runs the whole deployment: token upload and instantiation first, then the
/// duel platform upload and instantiation pointing at the token contract.
///
/// nothing is rolled back on failure; codes stored and contracts
/// instantiated before the failing step stay on chain.
pub async fn deploy<C>(
    connector: &C,
    inputs: &DeployInputs,
    secrets: &Secrets,
) -> Result<Deployment, DeployError>
where
    C: Connector + Sync + ?Sized,
{
    inputs.validate()?;
    let beneficiary = secrets.beneficiary(&inputs.network.address_prefix)?;

    let signer = connect(connector, &inputs.network, secrets).await?;

    let token_code_id = steps::store_code(&signer, &inputs.token.artifact).await?;
    let token =
        steps::instantiate_token(&signer, token_code_id, &inputs.token, beneficiary).await?;

    let duel_code_id = steps::store_code(&signer, &inputs.duel.artifact).await?;
    let duel =
        steps::instantiate_duel(&signer, duel_code_id, &inputs.duel, &token.contract_address)
            .await?;

    info!(
        target: DEPLOYER,
        "deployment complete: token {} (code {token_code_id}), duel {} (code {duel_code_id})",
        token.contract_address, duel.contract_address
    );

    Ok(Deployment {
        code_ids: CodeIds {
            token: token_code_id,
            duel: duel_code_id,
        },
        contracts: InstantiatedContracts { token, duel },
    })
}
