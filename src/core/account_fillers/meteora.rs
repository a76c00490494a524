//! Meteora DBC 池子账户填充

use super::AccountGetter;
use crate::core::events::{MeteoraDbcPool, MeteoraDbcSwapEvent};

/// 填充 Meteora DBC pool
///
/// DBC swap instruction account mapping:
/// 0: poolAuthority
/// 1: config
/// 2: pool
/// 3: inputTokenAccount
/// 4: outputTokenAccount
/// 5: baseVault
/// 6: quoteVault
/// 7: baseMint
/// 8: quoteMint
/// 9: payer
/// 10: tokenBaseProgram
/// 11: tokenQuoteProgram
/// 12: referralTokenAccount
/// 13: eventAuthority
/// 14: program
pub fn fill_dbc_pool(get: &AccountGetter<'_>) -> Option<MeteoraDbcPool> {
    Some(MeteoraDbcPool {
        pool_authority: get(0)?,
        config: get(1)?,
        pool: get(2)?,
        base_vault: get(5)?,
        quote_vault: get(6)?,
        base_mint: get(7)?,
        quote_mint: get(8)?,
        token_base_program: get(10)?,
        token_quote_program: get(11)?,
        referral_token_account: get(12)?,
        event_authority: get(13)?,
        ..Default::default()
    })
}

/// 用第一条 EvtSwap 回填价格
pub fn backfill(pool: &mut MeteoraDbcPool, e: &MeteoraDbcSwapEvent) {
    pool.sqrt_price = e.next_sqrt_price;
}
