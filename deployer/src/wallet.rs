use std::fmt;

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use cosmrs::AccountId;

use crate::{consts::HD_PATH, error::DeployError};

/// signing credential derived from a mnemonic.
///
/// in contrast to `cosmrs::crypto::secp256k1::SigningKey` this type is
/// `Send`; the cosmrs key is rebuilt for every sign doc.
#[derive(Clone)]
pub struct Wallet {
    inner: k256::ecdsa::SigningKey,
    address: AccountId,
}

impl Wallet {
    pub fn from_mnemonic(mnemonic: &str, prefix: &str) -> Result<Self, DeployError> {
        let phrase = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");
        // accepts 12, 15, 18, 21 and 24 word phrases
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &phrase)
            .map_err(|e| DeployError::Credential(format!("malformed mnemonic: {e}")))?;

        let path: DerivationPath = HD_PATH
            .parse()
            .map_err(|e| DeployError::Credential(format!("invalid derivation path: {e}")))?;
        let xprv = XPrv::derive_from_path(mnemonic.to_seed(""), &path)
            .map_err(|e| DeployError::Credential(format!("key derivation failed: {e}")))?;

        Self::from_signing_key(xprv.private_key().clone(), prefix)
    }

    fn from_signing_key(inner: k256::ecdsa::SigningKey, prefix: &str) -> Result<Self, DeployError> {
        let public_key: cosmrs::crypto::PublicKey = inner.verifying_key().into();
        let address = public_key
            .account_id(prefix)
            .map_err(|e| DeployError::Credential(format!("invalid address prefix {prefix}: {e}")))?;

        Ok(Self { inner, address })
    }

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn public_key(&self) -> cosmrs::crypto::PublicKey {
        self.inner.verifying_key().into()
    }

    #[cfg(test)]
    pub(crate) fn verifying_key(&self) -> k256::ecdsa::VerifyingKey {
        *self.inner.verifying_key()
    }

    pub fn signing_key(&self) -> cosmrs::crypto::secp256k1::SigningKey {
        cosmrs::crypto::secp256k1::SigningKey::new(Box::new(self.inner.clone()))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address.to_string())
            .finish_non_exhaustive()
    }
}
