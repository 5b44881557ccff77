mod config;
mod ethers_client;

use std::sync::Arc;

use anyhow::Context;
use ethers::signers::Signer;
use log::info;
use lottery_entrance::{
    notification::LogNotifier, session::Session, EnterOutcome, LotteryEntrance,
};

use crate::{config::DemoConfig, ethers_client::get_writer_ethers_client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DemoConfig::load();
    let network = config.get_network_config();
    let addresses = config.contract_addresses()?;

    let client = get_writer_ethers_client(0, &config.mnemonic, &network)
        .context("setting up wallet client")?;
    info!("Player: {:?}", client.signer().address());

    let session = Session::new(Some(network.chain_id), true, client);
    let mut entrance = LotteryEntrance::new(session, &addresses, Arc::new(LogNotifier))
        .with_confirmations(config.confirmations);
    entrance
        .activate()
        .await
        .context("loading lottery state")?;

    println!("{}\n", entrance.render()?);

    if config.enter_lottery {
        match entrance.enter().await? {
            EnterOutcome::Confirmed(tx_hash) => info!("Entered with {tx_hash:?}"),
            EnterOutcome::Ignored => info!("Entry ignored"),
        }
        println!("{}\n", entrance.render()?);
    }

    if entrance.contract_address().is_none() {
        return Ok(());
    }

    // re-render on every refresh until interrupted
    let mut changes = entrance.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}\n", entrance.render()?);
            }
        }
    }

    entrance.unmount();
    Ok(())
}
