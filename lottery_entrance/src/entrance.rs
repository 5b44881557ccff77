use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use ethers::types::{Address, TxHash};
use log::{debug, error, info, warn};
use tokio::sync::watch;

use crate::{
    config::ContractAddresses,
    contracts::{Connector, LotteryContract},
    error::Result,
    listener::WinnerSubscription,
    notification::{Notification, Notifier},
    session::Session,
    snapshot::LotterySnapshot,
    status::RequestStatus,
    view::View,
};

pub const DEFAULT_CONFIRMATIONS: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterOutcome {
    /// No contract, no wallet, or an entry is already in flight.
    Ignored,
    Confirmed(TxHash),
}

struct Shared<K> {
    contract: Option<Arc<K>>,
    snapshot: watch::Sender<LotterySnapshot>,
    status: RequestStatus,
    notifier: Arc<dyn Notifier>,
    confirmations: AtomicUsize,
}

impl<K: LotteryContract> Shared<K> {
    async fn update_ui(&self) -> Result<()> {
        let Some(contract) = &self.contract else {
            return Ok(());
        };

        let snapshot = LotterySnapshot::load(contract.as_ref()).await?;
        debug!("Loaded lottery state {snapshot:?}");
        self.snapshot.send_replace(snapshot);
        Ok(())
    }
}

/// One mounted lottery entrance view.
pub struct LotteryEntrance<C: Connector> {
    chain_id: Option<u64>,
    web3_enabled: bool,
    address: Option<Address>,
    shared: Arc<Shared<C::Contract>>,
    subscription: Option<WinnerSubscription>,
}

impl<C: Connector> LotteryEntrance<C> {
    /// Resolve and bind the lottery for the session's network. Makes no calls.
    pub fn new(
        session: Session<C>,
        addresses: &ContractAddresses,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let address = session
            .chain_id
            .and_then(|chain_id| addresses.resolve(chain_id));
        let contract = address.map(|address| Arc::new(session.connector.bind(address)));

        let (snapshot, _) = watch::channel(LotterySnapshot::default());

        Self {
            chain_id: session.chain_id,
            web3_enabled: session.web3_enabled,
            address,
            shared: Arc::new(Shared {
                contract,
                snapshot,
                status: RequestStatus::default(),
                notifier,
                confirmations: AtomicUsize::new(DEFAULT_CONFIRMATIONS),
            }),
            subscription: None,
        }
    }

    /// `new` followed by `activate`.
    pub async fn mount(
        session: Session<C>,
        addresses: &ContractAddresses,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let mut entrance = Self::new(session, addresses, notifier);
        entrance.activate().await?;
        Ok(entrance)
    }

    pub fn with_confirmations(self, confirmations: usize) -> Self {
        self.set_confirmations(confirmations);
        self
    }

    /// Confirmations to wait for on the next entry.
    pub fn set_confirmations(&self, confirmations: usize) {
        self.shared
            .confirmations
            .store(confirmations, Ordering::SeqCst);
    }

    /// Start watching for winners and load the current state.
    ///
    /// Does nothing without a connected wallet or a known contract. Calling
    /// it again reloads the state but keeps the existing subscription.
    pub async fn activate(&mut self) -> Result<()> {
        if !self.web3_enabled {
            return Ok(());
        }
        let Some(contract) = self.shared.contract.clone() else {
            return Ok(());
        };

        if let Some(chain_id) = self.chain_id {
            info!("Network's chain id: {chain_id}");
        }

        if !self.is_listening() {
            let shared = Arc::clone(&self.shared);
            self.subscription = Some(WinnerSubscription::spawn(contract, move |_| {
                let shared = Arc::clone(&shared);
                async move { shared.update_ui().await }
            }));
        }

        self.update_ui().await
    }

    /// Follow the wallet connecting or disconnecting.
    pub async fn set_web3_enabled(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.web3_enabled {
            return Ok(());
        }
        self.web3_enabled = enabled;

        if enabled {
            self.activate().await
        } else {
            self.stop_listening();
            Ok(())
        }
    }

    /// Re-read the entrance fee, player count and recent winner.
    pub async fn update_ui(&self) -> Result<()> {
        self.shared.update_ui().await
    }

    /// Enter the lottery paying the currently loaded entrance fee.
    pub async fn enter(&self) -> Result<EnterOutcome> {
        if !self.web3_enabled {
            return Ok(EnterOutcome::Ignored);
        }
        let Some(contract) = self.shared.contract.as_ref() else {
            return Ok(EnterOutcome::Ignored);
        };
        let Some(in_flight) = self.shared.status.try_begin() else {
            debug!("Entry already in flight, ignoring");
            return Ok(EnterOutcome::Ignored);
        };

        let value = self.snapshot().entrance_fee;
        let tx_hash = match contract.enter_lottery(value).await {
            Ok(tx_hash) => tx_hash,
            Err(e) => {
                error!("Failed to enter lottery: {e}");
                return Err(e);
            }
        };
        in_flight.submitted();

        let confirmations = self.shared.confirmations.load(Ordering::SeqCst);
        if let Err(e) = contract
            .wait_for_confirmations(tx_hash, confirmations)
            .await
        {
            error!("Entry {tx_hash:?} not confirmed: {e}");
            return Err(e);
        }
        drop(in_flight);

        self.shared
            .notifier
            .dispatch(Notification::transaction_complete());

        if let Err(e) = self.update_ui().await {
            warn!("Failed to refresh after entry {tx_hash:?}: {e}");
            return Err(e);
        }

        Ok(EnterOutcome::Confirmed(tx_hash))
    }

    pub fn contract_address(&self) -> Option<Address> {
        self.address
    }

    pub fn snapshot(&self) -> LotterySnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Receives every new snapshot, including ones loaded by winner events.
    pub fn subscribe(&self) -> watch::Receiver<LotterySnapshot> {
        self.shared.snapshot.subscribe()
    }

    pub fn status(&self) -> &RequestStatus {
        &self.shared.status
    }

    pub fn is_listening(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(WinnerSubscription::is_active)
    }

    pub fn view(&self) -> Result<View> {
        View::build(
            self.address,
            &self.snapshot(),
            self.shared.status.is_busy(),
        )
    }

    pub fn render(&self) -> Result<String> {
        Ok(self.view()?.to_string())
    }

    pub fn unmount(mut self) {
        self.stop_listening();
    }

    fn stop_listening(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
