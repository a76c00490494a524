//! PumpSwap 池子账户填充

use super::AccountGetter;
use crate::core::events::{PumpAmmTradeEvent, PumpSwapPool};

/// 填充 PumpSwap pool
///
/// PumpSwap Buy/Sell instruction account mapping (based on IDL):
/// 0: pool
/// 1: user
/// 2: globalConfig
/// 3: baseMint
/// 4: quoteMint
/// 5: userBaseTokenAccount
/// 6: userQuoteTokenAccount
/// 7: poolBaseTokenAccount
/// 8: poolQuoteTokenAccount
/// 9: protocolFeeRecipient
/// 10: protocolFeeRecipientTokenAccount
/// 11-16: token programs / system / ata / event authority / program
/// 17: coinCreatorVaultAta
/// 18: coinCreatorVaultAuthority
pub fn fill_pool(get: &AccountGetter<'_>) -> Option<PumpSwapPool> {
    Some(PumpSwapPool {
        pool: get(0)?,
        global_config: get(2)?,
        base_mint: get(3)?,
        quote_mint: get(4)?,
        pool_base_token_account: get(7)?,
        pool_quote_token_account: get(8)?,
        protocol_fee_recipient: get(9)?,
        protocol_fee_recipient_token_account: get(10)?,
        coin_creator_vault_ata: get(17)?,
        coin_creator_vault_authority: get(18)?,
        ..Default::default()
    })
}

/// 用第一条 Buy/Sell 事件回填储备量
pub fn backfill(pool: &mut PumpSwapPool, e: &PumpAmmTradeEvent) {
    pool.pool_base_token_reserves = e.pool_base_token_reserves;
    pool.pool_quote_token_reserves = e.pool_quote_token_reserves;
}
