/// The wallet session an entrance is mounted under.
///
/// `connector` binds contracts through whatever client the wallet exposes.
#[derive(Clone, Debug)]
pub struct Session<C> {
    pub chain_id: Option<u64>,
    pub web3_enabled: bool,
    pub connector: C,
}

impl<C> Session<C> {
    pub fn new(chain_id: Option<u64>, web3_enabled: bool, connector: C) -> Self {
        Self {
            chain_id,
            web3_enabled,
            connector,
        }
    }

    /// Wallets report the chain id as a hex quantity, e.g. `"0x7a69"`.
    pub fn from_raw_chain_id(raw_chain_id: &str, web3_enabled: bool, connector: C) -> Self {
        Self::new(parse_chain_id(raw_chain_id), web3_enabled, connector)
    }
}

/// Accepts `0x`-prefixed hex or plain decimal.
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
