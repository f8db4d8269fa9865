use std::{collections::HashMap, env, fmt, path::Path};

use log::{info, warn};

use crate::error::DeployError;

pub const MNEMONIC: &str = "MNEMONIC";
pub const BENEFICIARY_ADDRESS: &str = "BENEFICIARY_ADDRESS";

const SECRETS: &str = "SECRETS";

/// secrets read once at startup and handed to the deployer by value.
/// the process environment is never modified.
#[derive(Clone, Default)]
pub struct Secrets {
    mnemonic: Option<String>,
    beneficiary: Option<String>,
}

impl Secrets {
    /// reads the `.env` file (if any) and the process environment.
    /// variables set in the process environment take precedence.
    pub fn load(env_file: Option<&Path>) -> Result<Self, DeployError> {
        let mut vars = HashMap::new();

        match env_file {
            Some(path) => {
                info!(target: SECRETS, "reading secrets from {}", path.display());
                let iter = dotenv::from_path_iter(path).map_err(|e| {
                    DeployError::Config(format!("failed to open {}: {e}", path.display()))
                })?;
                for item in iter {
                    let (key, value) = item.map_err(|e| {
                        DeployError::Config(format!("failed to parse {}: {e}", path.display()))
                    })?;
                    vars.insert(key, value);
                }
            }
            None => match dotenv::dotenv_iter() {
                Ok(iter) => {
                    for item in iter {
                        let (key, value) = item.map_err(|e| {
                            DeployError::Config(format!("failed to parse .env: {e}"))
                        })?;
                        vars.insert(key, value);
                    }
                }
                Err(_) => warn!(target: SECRETS, "no .env file found, using process environment only"),
            },
        }

        // only our own keys are read from the process; unrelated
        // variables may hold non-unicode values
        for key in [MNEMONIC, BENEFICIARY_ADDRESS] {
            match env::var(key) {
                Ok(value) => {
                    vars.insert(key.to_string(), value);
                }
                Err(env::VarError::NotPresent) => {}
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(DeployError::Config(format!("{key} is not valid unicode")));
                }
            }
        }

        Ok(Self::from_vars(vars))
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut secrets = Self::default();
        for (key, value) in vars {
            match key.as_ref() {
                MNEMONIC => secrets.mnemonic = Some(value.into()),
                BENEFICIARY_ADDRESS => secrets.beneficiary = Some(value.into()),
                _ => {}
            }
        }
        secrets
    }

    pub fn mnemonic(&self) -> Result<&str, DeployError> {
        self.mnemonic
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| DeployError::Credential(format!("{MNEMONIC} is not set")))
    }

    /// beneficiary of the initial token balance, checked against the
    /// network's bech32 prefix. blank values count as unset.
    pub fn beneficiary(&self, prefix: &str) -> Result<Option<&str>, DeployError> {
        let Some(address) = self
            .beneficiary
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
        else {
            return Ok(None);
        };

        let (hrp, _) = bech32::decode(address).map_err(|e| {
            DeployError::Config(format!("invalid {BENEFICIARY_ADDRESS} {address}: {e}"))
        })?;
        if hrp.as_str() != prefix {
            return Err(DeployError::Config(format!(
                "{BENEFICIARY_ADDRESS} {address} does not use the {prefix} prefix"
            )));
        }

        Ok(Some(address))
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("beneficiary", &self.beneficiary)
            .finish()
    }
}
