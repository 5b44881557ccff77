pub mod lottery;

use std::{future::Future, sync::Arc};

use ethers::{
    abi::Detokenize,
    providers::Middleware,
    types::{Address, TransactionReceipt, TxHash, U256},
};
use tokio::sync::mpsc;

use crate::error::Result;

use self::lottery::EthersLottery;

/// Read-only functions of the lottery contract that feed the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LotteryField {
    EntranceFee,
    NumberOfPlayers,
    RecentWinner,
}

impl LotteryField {
    pub fn function_name(&self) -> &'static str {
        match self {
            LotteryField::EntranceFee => "getEntranceFee",
            LotteryField::NumberOfPlayers => "getNumberOfPlayers",
            LotteryField::RecentWinner => "getRecentWinner",
        }
    }
}

/// A single `WinnerPicked` occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinnerPicked {
    pub winner: Address,
}

/// Events buffered between the contract watch and the handler. A full buffer
/// pauses the watch until the handler catches up.
pub const WINNER_EVENT_BUFFER: usize = 16;

pub type WinnerSink = mpsc::Sender<Result<WinnerPicked>>;

/// Everything the entrance needs from a deployed lottery contract.
pub trait LotteryContract: Send + Sync + 'static {
    /// Call a view function taking no arguments and decode its output as `T`.
    fn read_field<T>(&self, field: LotteryField) -> impl Future<Output = Result<T>> + Send
    where
        T: Detokenize + Send + Sync + 'static;

    /// Submit `enterLottery` paying `value` wei. Resolves once the node accepted the transaction.
    fn enter_lottery(&self, value: U256) -> impl Future<Output = Result<TxHash>> + Send;

    fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        confirmations: usize,
    ) -> impl Future<Output = Result<TransactionReceipt>> + Send;

    /// Forward `WinnerPicked` events into `sink` until the receiving side is
    /// dropped or the underlying stream ends. Events that fail to decode are
    /// forwarded as errors and do not end the watch.
    fn watch_winners(&self, sink: WinnerSink) -> impl Future<Output = Result<()>> + Send;
}

/// Binds a lottery contract at a given address.
pub trait Connector {
    type Contract: LotteryContract;

    fn bind(&self, address: Address) -> Self::Contract;
}

impl<M> Connector for Arc<M>
where
    M: Middleware + 'static,
{
    type Contract = EthersLottery<M>;

    fn bind(&self, address: Address) -> Self::Contract {
        EthersLottery::new(address, Arc::clone(self))
    }
}

#[cfg(test)]
pub mod test_utils;
