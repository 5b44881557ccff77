use ethers::types::{Address, U256};

use crate::{
    contracts::{LotteryContract, LotteryField},
    error::Result,
};

/// Last known contract state as shown to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LotterySnapshot {
    /// In wei.
    pub entrance_fee: U256,
    pub num_players: U256,
    pub recent_winner: Address,
}

impl LotterySnapshot {
    /// Read all three fields from `contract`. Fails if any read fails.
    pub async fn load<C: LotteryContract>(contract: &C) -> Result<Self> {
        let (entrance_fee, num_players, recent_winner) = futures::try_join!(
            contract.read_field::<U256>(LotteryField::EntranceFee),
            contract.read_field::<U256>(LotteryField::NumberOfPlayers),
            contract.read_field::<Address>(LotteryField::RecentWinner),
        )?;

        Ok(Self {
            entrance_fee,
            num_players,
            recent_winner,
        })
    }
}
