pub(crate) const CHAIN_ID: &str = "constantine-3";
pub(crate) const RPC_URL: &str = "https://rpc.constantine.archway.io:443";
pub(crate) const ADDRESS_PREFIX: &str = "archway";
pub(crate) const FEE_DENOM: &str = "aconst";

/// constantine's minimum consensus fee in aconst per gas unit, used when the
/// rewards module cannot be queried
pub(crate) const GAS_PRICE: u64 = 140_000_000_000;
pub(crate) const GAS_ADJUSTMENT: f64 = 1.5;

/// cosmos hub coin type, which archway shares
pub(crate) const HD_PATH: &str = "m/44'/118'/0'/0/0";

pub(crate) const TOKEN_ARTIFACT: &str = "./artifacts/test_edt.wasm";
pub(crate) const DUEL_ARTIFACT: &str = "./artifacts/enigmaduel.wasm";

pub(crate) const TOKEN_MEMO: &str = "Instantiating the EDT token";
pub(crate) const DUEL_MEMO: &str = "Instantiating the enigma duel platform";

pub(crate) const INSTANTIATE_FUNDS: u128 = 1_000_000_000_000_000_000;
