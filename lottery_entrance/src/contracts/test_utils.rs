use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use ethers::{
    abi::{Detokenize, Token},
    types::{Address, TransactionReceipt, TxHash, U256},
};
use tokio::sync::{mpsc, Semaphore};

use crate::{
    error::{LotteryError, Result},
    notification::{Notification, Notifier},
};

use super::{Connector, LotteryContract, LotteryField, WinnerPicked, WinnerSink};

#[derive(Default)]
struct FakeState {
    entrance_fee: U256,
    num_players: U256,
    recent_winner: Address,
}

struct FakeInner {
    state: Mutex<FakeState>,
    reads: Mutex<HashMap<LotteryField, usize>>,
    fail_reads: AtomicBool,
    fail_submit: AtomicBool,
    fail_confirmation: AtomicBool,
    entries: Mutex<Vec<U256>>,
    hold_confirmations: AtomicBool,
    confirmation_gate: Semaphore,
    // node-side log queues, one per live watch
    winner_feeds: Mutex<Vec<mpsc::UnboundedSender<Result<WinnerPicked>>>>,
    watchers: AtomicUsize,
    last_confirmations: AtomicUsize,
}

impl Default for FakeInner {
    fn default() -> Self {
        Self {
            state: Default::default(),
            reads: Default::default(),
            fail_reads: AtomicBool::new(false),
            fail_submit: AtomicBool::new(false),
            fail_confirmation: AtomicBool::new(false),
            entries: Default::default(),
            hold_confirmations: AtomicBool::new(false),
            confirmation_gate: Semaphore::new(0),
            winner_feeds: Default::default(),
            watchers: AtomicUsize::new(0),
            last_confirmations: AtomicUsize::new(0),
        }
    }
}

/// In-memory lottery. Behaves like a deployed contract where every entry
/// adds a player and `pick_winner` emits `WinnerPicked`.
#[derive(Clone, Default)]
pub struct FakeLottery {
    inner: Arc<FakeInner>,
}

impl FakeLottery {
    pub fn new(entrance_fee: U256, num_players: u64, recent_winner: Address) -> Self {
        let lottery = Self::default();
        {
            let mut state = lottery.inner.state.lock().unwrap();
            state.entrance_fee = entrance_fee;
            state.num_players = U256::from(num_players);
            state.recent_winner = recent_winner;
        }
        lottery
    }

    pub fn reads_of(&self, field: LotteryField) -> usize {
        self.inner
            .reads
            .lock()
            .unwrap()
            .get(&field)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_reads(&self) -> usize {
        self.inner.reads.lock().unwrap().values().sum()
    }

    pub fn entries(&self) -> Vec<U256> {
        self.inner.entries.lock().unwrap().clone()
    }

    pub fn watchers(&self) -> usize {
        self.inner.watchers.load(Ordering::SeqCst)
    }

    pub fn last_confirmations(&self) -> usize {
        self.inner.last_confirmations.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_submit(&self, fail: bool) {
        self.inner.fail_submit.store(fail, Ordering::SeqCst);
    }

    /// The next confirmations report a reverted transaction.
    pub fn set_fail_confirmation(&self, fail: bool) {
        self.inner.fail_confirmation.store(fail, Ordering::SeqCst);
    }

    /// Confirmations block until `release_confirmation` is called.
    pub fn hold_confirmations(&self) {
        self.inner.hold_confirmations.store(true, Ordering::SeqCst);
    }

    pub fn release_confirmation(&self) {
        self.inner.confirmation_gate.add_permits(1);
    }

    /// Set the winner and notify every live watcher.
    pub fn pick_winner(&self, winner: Address) {
        {
            let mut state = self.inner.state.lock().unwrap();
            state.recent_winner = winner;
            state.num_players = U256::zero();
        }
        self.emit(Ok(WinnerPicked { winner }));
    }

    pub fn emit(&self, event: Result<WinnerPicked>) {
        let mut feeds = self.inner.winner_feeds.lock().unwrap();
        feeds.retain(|feed| {
            let event = match &event {
                Ok(e) => Ok(*e),
                Err(e) => Err(LotteryError::Contract(e.to_string())),
            };
            feed.send(event).is_ok()
        });
    }

    /// Ends every watch, as a node closing the filter would.
    pub fn close_watchers(&self) {
        self.inner.winner_feeds.lock().unwrap().clear();
    }
}

impl LotteryContract for FakeLottery {
    async fn read_field<T>(&self, field: LotteryField) -> Result<T>
    where
        T: Detokenize + Send + Sync + 'static,
    {
        *self.inner.reads.lock().unwrap().entry(field).or_default() += 1;

        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(LotteryError::Contract(format!(
                "{} reverted",
                field.function_name()
            )));
        }

        let token = {
            let state = self.inner.state.lock().unwrap();
            match field {
                LotteryField::EntranceFee => Token::Uint(state.entrance_fee),
                LotteryField::NumberOfPlayers => Token::Uint(state.num_players),
                LotteryField::RecentWinner => Token::Address(state.recent_winner),
            }
        };

        T::from_tokens(vec![token]).map_err(|e| LotteryError::Contract(e.to_string()))
    }

    async fn enter_lottery(&self, value: U256) -> Result<TxHash> {
        if self.inner.fail_submit.load(Ordering::SeqCst) {
            return Err(LotteryError::Contract(String::from("user rejected")));
        }

        let mut entries = self.inner.entries.lock().unwrap();
        entries.push(value);
        Ok(TxHash::from_low_u64_be(entries.len() as u64))
    }

    async fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        confirmations: usize,
    ) -> Result<TransactionReceipt> {
        self.inner
            .last_confirmations
            .store(confirmations, Ordering::SeqCst);

        if self.inner.hold_confirmations.load(Ordering::SeqCst) {
            self.inner
                .confirmation_gate
                .acquire()
                .await
                .map_err(|e| LotteryError::Provider(e.to_string()))?
                .forget();
        }

        if self.inner.fail_confirmation.load(Ordering::SeqCst) {
            return Err(LotteryError::Reverted(tx_hash));
        }

        {
            let mut state = self.inner.state.lock().unwrap();
            state.num_players += U256::one();
        }

        Ok(TransactionReceipt {
            transaction_hash: tx_hash,
            ..Default::default()
        })
    }

    async fn watch_winners(&self, sink: WinnerSink) -> Result<()> {
        let (feed, mut logs) = mpsc::unbounded_channel();
        self.inner.winner_feeds.lock().unwrap().push(feed);
        self.inner.watchers.fetch_add(1, Ordering::SeqCst);

        while let Some(event) = logs.recv().await {
            if sink.send(event).await.is_err() {
                break;
            }
        }

        Ok(())
    }
}

/// Hands out the same fake for every bind and remembers the addresses asked for.
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub lottery: FakeLottery,
    bound: Arc<Mutex<Vec<Address>>>,
}

impl FakeConnector {
    pub fn new(lottery: FakeLottery) -> Self {
        Self {
            lottery,
            bound: Default::default(),
        }
    }

    pub fn bound(&self) -> Vec<Address> {
        self.bound.lock().unwrap().clone()
    }
}

impl Connector for FakeConnector {
    type Contract = FakeLottery;

    fn bind(&self, address: Address) -> Self::Contract {
        self.bound.lock().unwrap().push(address);
        self.lottery.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub dispatched: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.dispatched.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn dispatch(&self, notification: Notification) {
        self.dispatched.lock().unwrap().push(notification);
    }
}

/// Poll `condition` until it holds, failing the test after two seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
