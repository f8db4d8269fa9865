use std::{fs, path::PathBuf};

use anyhow::anyhow;
use common::{artifacts_dir, CodeIds, InstantiationOutputs};
use log::info;
use serde::{de::DeserializeOwned, Serialize};

const ARTIFACTS: &str = "ARTIFACTS";

const CODE_IDS_FILE: &str = "code_ids.toml";
const INSTANTIATION_OUTPUTS_FILE: &str = "instantiation_outputs.toml";

fn write_toml<T: Serialize>(file: &str, value: &T) -> anyhow::Result<PathBuf> {
    let dir = artifacts_dir();
    fs::create_dir_all(&dir)?;

    let path = dir.join(file);
    fs::write(&path, toml::to_string(value)?)?;
    Ok(path)
}

fn read_toml<T: DeserializeOwned>(file: &str, missing_hint: &str) -> anyhow::Result<T> {
    let path = artifacts_dir().join(file);
    let content = fs::read_to_string(&path).map_err(|_| {
        anyhow!("{} not found. {missing_hint}", path.display())
    })?;
    toml::from_str(&content).map_err(|e| anyhow!("failed to reconstruct {file}: {e}"))
}

pub(crate) fn write_code_ids(code_ids: &CodeIds) -> anyhow::Result<()> {
    let path = write_toml(CODE_IDS_FILE, code_ids)?;
    info!(target: ARTIFACTS, "wrote code ids to {}", path.display());
    Ok(())
}

pub(crate) fn read_code_ids() -> anyhow::Result<CodeIds> {
    read_toml(CODE_IDS_FILE, "run the --store-codes step first.")
}

pub(crate) fn write_instantiation_outputs(outputs: &InstantiationOutputs) -> anyhow::Result<()> {
    let path = write_toml(INSTANTIATION_OUTPUTS_FILE, outputs)?;
    info!(target: ARTIFACTS, "wrote contract addresses to {}", path.display());
    Ok(())
}
