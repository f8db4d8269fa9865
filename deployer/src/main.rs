mod artifacts;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use deployer::{steps, ArchwayConnector, DeployError, Secrets};
use log::{error, info};

const DEPLOYER: &str = "DEPLOYER";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with network and contract parameters. the built-in
    /// constantine-3 parameters are used when omitted.
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// env file holding `MNEMONIC` and `BENEFICIARY_ADDRESS`.
    /// defaults to a `.env` in the current directory or its parents.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// uploads both wasm artifacts and records their code ids.
    ///
    /// prerequisite for the following steps:
    ///
    /// - `instantiate_contracts`
    #[arg(long)]
    store_codes: bool,

    /// instantiates the token and duel contracts from the recorded
    /// code ids.
    ///
    /// depends on the following steps:
    ///
    /// - `store_codes`
    #[arg(long)]
    instantiate_contracts: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: DEPLOYER, "deployment failed: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<DeployError>()
        .map(DeployError::exit_code)
        .unwrap_or(1)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let inputs = steps::read_inputs(cli.inputs.as_deref())?;
    let secrets = Secrets::load(cli.env_file.as_deref())?;

    // if no step flags were specified we deploy end to end
    let run_all = !cli.store_codes && !cli.instantiate_contracts;

    if run_all {
        let deployment = deployer::deploy(&ArchwayConnector, &inputs, &secrets).await?;
        artifacts::write_code_ids(&deployment.code_ids)?;
        artifacts::write_instantiation_outputs(&deployment.contracts.outputs())?;
        return Ok(());
    }

    inputs.validate()?;
    let beneficiary = secrets.beneficiary(&inputs.network.address_prefix)?;
    let signer = deployer::connect(&ArchwayConnector, &inputs.network, &secrets).await?;

    if cli.store_codes {
        let code_ids = steps::store_codes(&signer, &inputs).await?;
        artifacts::write_code_ids(&code_ids)?;
    }

    if cli.instantiate_contracts {
        let code_ids = artifacts::read_code_ids()?;
        info!(target: DEPLOYER, "using code ids: token {}, duel {}", code_ids.token, code_ids.duel);

        let contracts =
            steps::instantiate_contracts(&signer, &inputs, code_ids, beneficiary).await?;
        artifacts::write_instantiation_outputs(&contracts.outputs())?;
    }

    Ok(())
}
