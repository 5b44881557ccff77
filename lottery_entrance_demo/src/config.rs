use std::{
    error::Error,
    path::{Path, PathBuf},
};

use ethers::types::Address;
use lottery_entrance::{
    config::{ContractAddresses, ContractNetworkConfig},
    entrance::DEFAULT_CONFIRMATIONS,
};
use log::{info, warn};

const RPC_URL_ENV_VAR: &str = "RPC_URL";
const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";
const MNEMONIC_ENV_VAR: &str = "MNEMONIC";
const LOTTERY_ADDRESSES_FILE_ENV_VAR: &str = "LOTTERY_ADDRESSES_FILE";
const LOTTERY_ADDRESS_ENV_VAR: &str = "LOTTERY_ADDRESS";
const ENTER_LOTTERY_ENV_VAR: &str = "ENTER_LOTTERY";
const CONFIRMATIONS_ENV_VAR: &str = "CONFIRMATIONS";

const DEFAULT_RPC_URL: &str = "http://localhost:8545";
const DEFAULT_CHAIN_ID: u64 = 31337;
// hardhat's well known development mnemonic
const DEFAULT_MNEMONIC: &str = "test test test test test test test test test test test junk";
const DEFAULT_LOTTERY_ADDRESSES_FILE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/constants/contractAddresses.json");

pub struct DemoConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub mnemonic: String,
    pub lottery_addresses_file: String,
    /// Takes precedence over the addresses file for `chain_id`.
    pub lottery_address: Option<String>,
    pub enter_lottery: bool,
    pub confirmations: usize,
}

impl DemoConfig {
    /// load from env, else local
    pub fn load() -> Self {
        match Self::try_from_env() {
            Ok(c) => {
                info!("Loaded config from env");
                c
            }
            Err(e) => {
                warn!("Failed to load config from env: {}", e);
                info!("Loading local config");
                Self::local()
            }
        }
    }

    fn local() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            mnemonic: DEFAULT_MNEMONIC.to_string(),
            lottery_addresses_file: DEFAULT_LOTTERY_ADDRESSES_FILE.to_string(),
            lottery_address: std::env::var(LOTTERY_ADDRESS_ENV_VAR).ok(),
            enter_lottery: enter_lottery_from_env(),
            confirmations: confirmations_from_env(),
        }
    }

    fn try_from_env() -> Result<Self, Box<dyn Error>> {
        dotenv::dotenv().ok();

        let rpc_url = std::env::var(RPC_URL_ENV_VAR)?;
        let chain_id = std::env::var(CHAIN_ID_ENV_VAR)?.parse()?;
        let mnemonic = std::env::var(MNEMONIC_ENV_VAR)?;
        let lottery_addresses_file = std::env::var(LOTTERY_ADDRESSES_FILE_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_LOTTERY_ADDRESSES_FILE.to_string());
        let lottery_address = std::env::var(LOTTERY_ADDRESS_ENV_VAR).ok();

        Ok(Self {
            rpc_url,
            chain_id,
            mnemonic,
            lottery_addresses_file,
            lottery_address,
            enter_lottery: enter_lottery_from_env(),
            confirmations: confirmations_from_env(),
        })
    }

    pub fn get_network_config(&self) -> ContractNetworkConfig {
        ContractNetworkConfig {
            rpc_url: self.rpc_url.clone(),
            chain_id: self.chain_id,
        }
    }

    pub fn contract_addresses(&self) -> anyhow::Result<ContractAddresses> {
        let mut addresses = ContractAddresses::new();

        if let Some(address) = &self.lottery_address {
            let address: Address = address.parse()?;
            addresses.insert(self.chain_id, address);
            return Ok(addresses);
        }

        match ContractAddresses::from_file(resolve_path(&self.lottery_addresses_file)) {
            Ok(from_file) => addresses = from_file,
            Err(e) => warn!(
                "Could not read lottery addresses from {}: {e}",
                self.lottery_addresses_file
            ),
        }

        Ok(addresses)
    }
}

/// Relative paths that don't exist from the working directory are taken
/// relative to this crate, where the bundled constants live.
fn resolve_path(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}

fn enter_lottery_from_env() -> bool {
    std::env::var(ENTER_LOTTERY_ENV_VAR)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn confirmations_from_env() -> usize {
    std::env::var(CONFIRMATIONS_ENV_VAR)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CONFIRMATIONS)
}
