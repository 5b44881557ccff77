use std::sync::Arc;

use ethers::{
    abi::Detokenize,
    providers::{Middleware, PendingTransaction},
    types::{Address, TransactionReceipt, TxHash, U256, U64},
};
use futures::StreamExt;
use log::debug;

use crate::error::{LotteryError, Result};

use super::{LotteryContract, LotteryField, WinnerPicked, WinnerSink};

// Include generated contract types from build script
include!(concat!(env!("OUT_DIR"), "/lottery_contract.rs"));

impl From<WinnerPickedFilter> for WinnerPicked {
    fn from(event: WinnerPickedFilter) -> Self {
        WinnerPicked {
            winner: event.winner,
        }
    }
}

pub struct EthersLottery<M> {
    contract: Lottery<M>,
}

impl<M: Middleware> EthersLottery<M> {
    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: Lottery::new(address, client),
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }
}

impl<M> LotteryContract for EthersLottery<M>
where
    M: Middleware + 'static,
{
    async fn read_field<T>(&self, field: LotteryField) -> Result<T>
    where
        T: Detokenize + Send + Sync + 'static,
    {
        let call = self.contract.method::<_, T>(field.function_name(), ())?;

        call.call()
            .await
            .map_err(|e| LotteryError::Contract(e.to_string()))
    }

    async fn enter_lottery(&self, value: U256) -> Result<TxHash> {
        let call = self.contract.enter_lottery().value(value);

        let pending = call
            .send()
            .await
            .map_err(|e| LotteryError::Contract(e.to_string()))?;
        let tx_hash = pending.tx_hash();

        debug!("enterLottery submitted as {tx_hash:?} with value {value}");
        Ok(tx_hash)
    }

    async fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        confirmations: usize,
    ) -> Result<TransactionReceipt> {
        let client = self.contract.client();

        let receipt = PendingTransaction::new(tx_hash, client.provider())
            .confirmations(confirmations)
            .await?;

        check_receipt(tx_hash, receipt)
    }

    async fn watch_winners(&self, sink: WinnerSink) -> Result<()> {
        let event = self.contract.event::<WinnerPickedFilter>();
        let mut stream = event
            .stream()
            .await
            .map_err(|e| LotteryError::Contract(e.to_string()))?;

        while let Some(item) = stream.next().await {
            let item = item
                .map(WinnerPicked::from)
                .map_err(|e| LotteryError::Contract(e.to_string()));

            if sink.send(item).await.is_err() {
                // nobody is listening anymore
                break;
            }
        }

        Ok(())
    }
}

/// A missing receipt means the transaction was dropped, status 0 means it reverted.
fn check_receipt(
    tx_hash: TxHash,
    receipt: Option<TransactionReceipt>,
) -> Result<TransactionReceipt> {
    let receipt = receipt.ok_or(LotteryError::Dropped(tx_hash))?;

    if receipt.status == Some(U64::zero()) {
        return Err(LotteryError::Reverted(tx_hash));
    }

    Ok(receipt)
}
