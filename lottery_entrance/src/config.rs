use std::{collections::HashMap, fs, path::Path};

use ethers::types::Address;

use crate::error::{LotteryError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct ContractNetworkConfig {
    pub rpc_url: String,
    pub chain_id: u64,
}

/// Deployed lottery addresses, keyed by chain id.
///
/// The JSON form uses string keys, e.g. `{"31337": ["0x5FbD..."]}`. Only the
/// first address of a network is ever used, later entries are older deployments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractAddresses {
    by_chain: HashMap<u64, Vec<Address>>,
}

impl ContractAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<Address>> = serde_json::from_str(json)?;

        let mut by_chain = HashMap::with_capacity(raw.len());
        for (chain_id, addresses) in raw {
            let chain_id = chain_id
                .trim()
                .parse::<u64>()
                .map_err(|e| LotteryError::Config(format!("chain id {chain_id:?}: {e}")))?;
            by_chain.insert(chain_id, addresses);
        }

        Ok(Self { by_chain })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, chain_id: u64, address: Address) {
        self.by_chain.entry(chain_id).or_default().push(address);
    }

    pub fn resolve(&self, chain_id: u64) -> Option<Address> {
        self.by_chain
            .get(&chain_id)
            .and_then(|addresses| addresses.first())
            .copied()
    }
}
