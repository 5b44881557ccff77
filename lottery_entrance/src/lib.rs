pub mod config;
pub mod contracts;
pub mod entrance;
pub mod error;
pub mod listener;
pub mod notification;
pub mod session;
pub mod snapshot;
pub mod status;
pub mod view;

pub use entrance::{EnterOutcome, LotteryEntrance};
pub use error::{LotteryError, Result};
