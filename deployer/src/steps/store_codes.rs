use std::{fs, path::Path};

use common::CodeIds;
use log::{error, info};

use crate::{chain::WasmSigner, error::DeployError, steps::DeployInputs};

const STORE_CODES: &str = "STORE_CODES";

pub fn read_artifact(path: &Path) -> Result<Vec<u8>, DeployError> {
    fs::read(path).map_err(|source| DeployError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// reads one artifact from disk and uploads it. only a defined, non-zero
/// code id counts as a successful upload.
pub async fn store_code<S>(signer: &S, artifact: &Path) -> Result<u64, DeployError>
where
    S: WasmSigner + Sync + ?Sized,
{
    info!(target: STORE_CODES, "reading artifact {}...", artifact.display());
    let wasm_byte_code = read_artifact(artifact)?;

    let upload = signer.upload(wasm_byte_code).await?;

    match upload.stored_code_id() {
        Some(code_id) => {
            info!(target: STORE_CODES, "Storage successful: {}", upload.transaction_hash);
            info!(
                target: STORE_CODES,
                "{} stored as code id {code_id} (sha256 {})",
                artifact.display(),
                upload.checksum
            );
            Ok(code_id)
        }
        None => {
            error!(target: STORE_CODES, "Storage failed: {}", upload.logs);
            Err(DeployError::Chain(format!(
                "upload of {} in tx {} did not produce a code id",
                artifact.display(),
                upload.transaction_hash
            )))
        }
    }
}

/// uploads the token and duel artifacts, each from its own file
pub async fn store_codes<S>(signer: &S, inputs: &DeployInputs) -> Result<CodeIds, DeployError>
where
    S: WasmSigner + Sync + ?Sized,
{
    info!(target: STORE_CODES, "storing contract codes...");

    let token = store_code(signer, &inputs.token.artifact).await?;
    let duel = store_code(signer, &inputs.duel.artifact).await?;

    Ok(CodeIds { token, duel })
}
