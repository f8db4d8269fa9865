//! gas pricing from archway's rewards module.
//!
//! the module keeps a minimum consensus fee that moves with network usage,
//! so the price is queried before each transaction instead of being fixed.

use cosmrs::proto::cosmos::base::v1beta1::{Coin as ProtoCoin, DecCoin};

use crate::error::DeployError;

pub(crate) const ESTIMATE_TX_FEES_PATH: &str = "/archway.rewards.v1.Query/EstimateTxFees";

/// `sdk.Dec` fixed point precision
const DEC_PRECISION: u32 = 18;
const DEC_ONE: u128 = 10u128.pow(DEC_PRECISION);

#[derive(Clone, PartialEq, prost::Message)]
pub(crate) struct QueryEstimateTxFeesRequest {
    #[prost(uint64, tag = "1")]
    pub gas_limit: u64,
    #[prost(string, tag = "2")]
    pub contract_address: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub(crate) struct QueryEstimateTxFeesResponse {
    #[prost(message, optional, tag = "1")]
    pub gas_unit_price: Option<DecCoin>,
    #[prost(message, repeated, tag = "2")]
    pub estimated_fee: Vec<ProtoCoin>,
}

/// price of one gas unit as an `sdk.Dec` scaled by 10^18
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GasPrice(u128);

impl GasPrice {
    pub fn from_integer(amount: u64) -> Self {
        Self(u128::from(amount) * DEC_ONE)
    }

    /// parses a dec coin amount. proto encoded decs carry the scaled
    /// integer, their text form carries a decimal point.
    pub fn from_dec_str(amount: &str) -> Result<Self, DeployError> {
        let invalid = || DeployError::Chain(format!("invalid gas price {amount:?}"));

        let Some((whole, fraction)) = amount.split_once('.') else {
            return amount.parse().map(Self).map_err(|_| invalid());
        };

        if fraction.len() > DEC_PRECISION as usize || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: u128 = whole.parse().map_err(|_| invalid())?;
        let fraction: u128 = if fraction.is_empty() {
            0
        } else {
            fraction.parse::<u128>().map_err(|_| invalid())?
                * 10u128.pow(DEC_PRECISION - fraction.len() as u32)
        };

        whole
            .checked_mul(DEC_ONE)
            .and_then(|scaled| scaled.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// fee for `gas_limit` gas units, rounded up to the next whole unit
    pub fn fee(&self, gas_limit: u64) -> Result<u128, DeployError> {
        u128::from(gas_limit)
            .checked_mul(self.0)
            .map(|scaled| scaled.div_ceil(DEC_ONE))
            .ok_or_else(|| DeployError::Chain(format!("fee for {gas_limit} gas overflows")))
    }
}

/// reads the gas unit price from an `EstimateTxFees` response, checking it
/// is quoted in the fee denom
pub(crate) fn gas_price(
    response: &QueryEstimateTxFeesResponse,
    fee_denom: &str,
) -> Result<GasPrice, DeployError> {
    let price = response
        .gas_unit_price
        .as_ref()
        .ok_or_else(|| DeployError::Chain("fee estimate carries no gas unit price".to_string()))?;

    if price.denom != fee_denom {
        return Err(DeployError::Chain(format!(
            "gas price quoted in {}, expected {fee_denom}",
            price.denom
        )));
    }

    GasPrice::from_dec_str(&price.amount)
}
