//! PumpFun 池子账户填充

use super::AccountGetter;
use crate::core::events::{PumpFunPool, PumpFunTradeEvent};

/// 填充 PumpFun bonding curve
///
/// PumpFun Buy/Sell instruction account mapping (based on IDL):
/// 0: global
/// 1: feeRecipient
/// 2: mint
/// 3: bondingCurve
/// 4: associatedBondingCurve
/// 5: associatedUser
/// 6: user
/// 7: systemProgram
/// 8: tokenProgram (buy) / creatorVault (sell)
/// 9: creatorVault (buy) / tokenProgram (sell)
/// 10: eventAuthority
/// 11: program
pub fn fill_pool(get: &AccountGetter<'_>) -> Option<PumpFunPool> {
    Some(PumpFunPool {
        global: get(0)?,
        fee_recipient: get(1)?,
        mint: get(2)?,
        bonding_curve: get(3)?,
        associated_bonding_curve: get(4)?,
        creator_vault: get(9)?,
        event_authority: get(10)?,
        ..Default::default()
    })
}

/// 用最后一条 TradeEvent 回填储备量
pub fn backfill(pool: &mut PumpFunPool, e: &PumpFunTradeEvent) {
    pool.virtual_sol_reserves = e.virtual_sol_reserves;
    pool.virtual_token_reserves = e.virtual_token_reserves;
    pool.real_sol_reserves = e.real_sol_reserves;
    pool.real_token_reserves = e.real_token_reserves;
}
