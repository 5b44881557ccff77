use thiserror::Error;

#[derive(Error, Debug)]
pub enum LotteryError {
    #[error("contract call failed: {0}")]
    Contract(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("transaction {0:?} was dropped from the mempool")]
    Dropped(ethers::types::TxHash),

    #[error("transaction {0:?} reverted")]
    Reverted(ethers::types::TxHash),

    #[error("abi error: {0}")]
    Abi(#[from] ethers::contract::AbiError),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("unit conversion failed: {0}")]
    Conversion(#[from] ethers::utils::ConversionError),
}

impl From<ethers::providers::ProviderError> for LotteryError {
    fn from(e: ethers::providers::ProviderError) -> Self {
        LotteryError::Provider(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LotteryError>;
