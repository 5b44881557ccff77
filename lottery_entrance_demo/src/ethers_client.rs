use std::sync::Arc;

use ethers::{
    core::k256::ecdsa::SigningKey,
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{coins_bip39::English, MnemonicBuilder, Signer, Wallet},
};
use lottery_entrance::config::ContractNetworkConfig;

pub type EtherSigner = SignerMiddleware<Provider<Http>, Wallet<SigningKey>>;

pub fn get_writer_ethers_client(
    id: u32,
    mnemonic: &str,
    network: &ContractNetworkConfig,
) -> anyhow::Result<Arc<EtherSigner>> {
    let wallet = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .index(id)?
        .build()?
        .with_chain_id(network.chain_id);

    let provider = Provider::<Http>::try_from(network.rpc_url.as_str())?;
    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}
