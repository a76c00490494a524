//! Raydium Launchpad 池子账户填充

use super::AccountGetter;
use crate::core::events::{RaydiumLaunchpadPool, RaydiumLaunchpadTradeEvent};

/// 填充 Raydium Launchpad pool
///
/// Launchpad buy/sell instruction account mapping:
/// 0: payer
/// 1: authority
/// 2: globalConfig
/// 3: platformConfig
/// 4: poolState
/// 5: userBaseToken
/// 6: userQuoteToken
/// 7: baseVault
/// 8: quoteVault
/// 9: baseTokenMint
/// 10: quoteTokenMint
/// 11: baseTokenProgram
/// 12: quoteTokenProgram
/// 13: eventAuthority
/// 14: program
pub fn fill_launchpad_pool(get: &AccountGetter<'_>) -> Option<RaydiumLaunchpadPool> {
    Some(RaydiumLaunchpadPool {
        authority: get(1)?,
        global_config: get(2)?,
        platform_config: get(3)?,
        pool_state: get(4)?,
        base_vault: get(7)?,
        quote_vault: get(8)?,
        base_mint: get(9)?,
        quote_mint: get(10)?,
        event_authority: get(13)?,
        ..Default::default()
    })
}

/// 用最后一条 TradeEvent 回填：交易后的真实储备即下一笔交易前的储备
pub fn backfill(pool: &mut RaydiumLaunchpadPool, e: &RaydiumLaunchpadTradeEvent) {
    pool.virtual_base = e.virtual_base;
    pool.virtual_quote = e.virtual_quote;
    pool.real_base = e.real_base_after;
    pool.real_quote = e.real_quote_after;
}
