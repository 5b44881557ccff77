use std::fmt;

use ethers::{
    types::{Address, U256},
    utils::{format_units, to_checksum},
};

use crate::{error::Result, snapshot::LotterySnapshot};

pub const NO_CONTRACT_MESSAGE: &str = "No Lottery address detected";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    NoContract,
    Summary(Summary),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub entrance_fee_eth: String,
    pub num_players: String,
    pub recent_winner: String,
    pub button: EnterButton,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnterButton {
    pub enabled: bool,
}

impl EnterButton {
    pub fn label(&self) -> &'static str {
        if self.enabled {
            "Enter Lottery"
        } else {
            "..."
        }
    }
}

impl View {
    pub fn build(address: Option<Address>, snapshot: &LotterySnapshot, busy: bool) -> Result<Self> {
        if address.is_none() {
            return Ok(View::NoContract);
        }

        Ok(View::Summary(Summary {
            entrance_fee_eth: format_ether(snapshot.entrance_fee)?,
            num_players: snapshot.num_players.to_string(),
            recent_winner: to_checksum(&snapshot.recent_winner, None),
            button: EnterButton { enabled: !busy },
        }))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::NoContract => write!(f, "{NO_CONTRACT_MESSAGE}"),
            View::Summary(summary) => {
                writeln!(f, "Lottery entrance fee is: {} ETH", summary.entrance_fee_eth)?;
                writeln!(f, "Number of players: {}", summary.num_players)?;
                writeln!(f, "Recent winner: {}", summary.recent_winner)?;
                write!(f, "[ {} ]", summary.button.label())
            }
        }
    }
}

/// Wei as ether with trailing zeros dropped, always keeping one decimal.
pub fn format_ether(wei: U256) -> Result<String> {
    let formatted = format_units(wei, "ether")?;

    let formatted = match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    };

    Ok(formatted)
}
