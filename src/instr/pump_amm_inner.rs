//! PumpSwap (Pump AMM) Inner Instruction 解析器
//!
//! BuyEvent 与 SellEvent 的前缀布局一致：
//! timestamp, base 数量, quote 限额, 4 个储备量, quote 数量, 手续费字段, 6 个账户。
//! 之后追加的 coin creator 字段不解析。

use crate::core::error::ParseResult;
use crate::core::events::PumpAmmTradeEvent;
use super::inner_common::event_payload;

/// PumpSwap inner instruction discriminators (16 bytes)
pub mod discriminators {
    pub const BUY_EVENT: [u8; 16] = [
        228, 69, 165, 46, 81, 203, 154, 29,
        103, 244, 82, 31, 44, 245, 119, 119,
    ];

    pub const SELL_EVENT: [u8; 16] = [
        228, 69, 165, 46, 81, 203, 154, 29,
        62, 47, 55, 10, 165, 3, 220, 42,
    ];
}

const TRADE_EVENT: &str = "PumpAmmTradeEvent";

/// 解析 BuyEvent / SellEvent（`data` 含 discriminator，方向由 discriminator 决定）
#[inline]
pub fn decode_trade_event(data: &[u8], is_buy: bool) -> ParseResult<PumpAmmTradeEvent> {
    let payload = event_payload(TRADE_EVENT, data)?;

    #[cfg(not(feature = "parse-zero-copy"))]
    {
        borsh_impl::trade_event(payload, is_buy)
    }

    #[cfg(feature = "parse-zero-copy")]
    {
        zero_copy_impl::trade_event(payload, is_buy)
    }
}

#[cfg(not(feature = "parse-zero-copy"))]
mod borsh_impl {
    use borsh::BorshDeserialize;
    use solana_sdk::pubkey::Pubkey;

    use super::*;
    use crate::instr::inner_common::borsh_prefix;

    #[derive(BorshDeserialize)]
    struct TradeEventWire {
        timestamp: i64,
        base_amount: u64,
        quote_amount_limit: u64,
        user_base_token_reserves: u64,
        user_quote_token_reserves: u64,
        pool_base_token_reserves: u64,
        pool_quote_token_reserves: u64,
        quote_amount: u64,
        lp_fee_basis_points: u64,
        lp_fee: u64,
        protocol_fee_basis_points: u64,
        protocol_fee: u64,
        quote_amount_with_lp_fee: u64,
        user_quote_amount: u64,
        pool: [u8; 32],
        user: [u8; 32],
        user_base_token_account: [u8; 32],
        user_quote_token_account: [u8; 32],
        protocol_fee_recipient: [u8; 32],
        protocol_fee_recipient_token_account: [u8; 32],
    }

    pub(super) fn trade_event(payload: &[u8], is_buy: bool) -> ParseResult<PumpAmmTradeEvent> {
        let w: TradeEventWire = borsh_prefix(TRADE_EVENT, payload)?;
        Ok(PumpAmmTradeEvent {
            is_buy,
            timestamp: w.timestamp,
            base_amount: w.base_amount,
            quote_amount_limit: w.quote_amount_limit,
            user_base_token_reserves: w.user_base_token_reserves,
            user_quote_token_reserves: w.user_quote_token_reserves,
            pool_base_token_reserves: w.pool_base_token_reserves,
            pool_quote_token_reserves: w.pool_quote_token_reserves,
            quote_amount: w.quote_amount,
            lp_fee_basis_points: w.lp_fee_basis_points,
            lp_fee: w.lp_fee,
            protocol_fee_basis_points: w.protocol_fee_basis_points,
            protocol_fee: w.protocol_fee,
            quote_amount_with_lp_fee: w.quote_amount_with_lp_fee,
            user_quote_amount: w.user_quote_amount,
            pool: Pubkey::new_from_array(w.pool),
            user: Pubkey::new_from_array(w.user),
            user_base_token_account: Pubkey::new_from_array(w.user_base_token_account),
            user_quote_token_account: Pubkey::new_from_array(w.user_quote_token_account),
            protocol_fee_recipient: Pubkey::new_from_array(w.protocol_fee_recipient),
            protocol_fee_recipient_token_account: Pubkey::new_from_array(
                w.protocol_fee_recipient_token_account,
            ),
        })
    }
}

#[cfg(feature = "parse-zero-copy")]
mod zero_copy_impl {
    use super::*;
    use crate::instr::inner_common::EventReader;

    pub(super) fn trade_event(payload: &[u8], is_buy: bool) -> ParseResult<PumpAmmTradeEvent> {
        let mut r = EventReader::new(TRADE_EVENT, payload);
        Ok(PumpAmmTradeEvent {
            is_buy,
            timestamp: r.i64()?,
            base_amount: r.u64()?,
            quote_amount_limit: r.u64()?,
            user_base_token_reserves: r.u64()?,
            user_quote_token_reserves: r.u64()?,
            pool_base_token_reserves: r.u64()?,
            pool_quote_token_reserves: r.u64()?,
            quote_amount: r.u64()?,
            lp_fee_basis_points: r.u64()?,
            lp_fee: r.u64()?,
            protocol_fee_basis_points: r.u64()?,
            protocol_fee: r.u64()?,
            quote_amount_with_lp_fee: r.u64()?,
            user_quote_amount: r.u64()?,
            pool: r.pubkey()?,
            user: r.pubkey()?,
            user_base_token_account: r.pubkey()?,
            user_quote_token_account: r.pubkey()?,
            protocol_fee_recipient: r.pubkey()?,
            protocol_fee_recipient_token_account: r.pubkey()?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::test_utils::Bytes;
    use solana_sdk::pubkey::Pubkey;

    /// 储备量按 (pool_base, pool_quote) 给出，其余字段填充递增值
    pub(crate) fn trade_event_data(is_buy: bool, pool: &Pubkey, pool_base: u64, pool_quote: u64) -> Vec<u8> {
        let disc = if is_buy { discriminators::BUY_EVENT } else { discriminators::SELL_EVENT };
        let mut b = Bytes::with(&disc)
            .i64(1_736_000_000)
            .u64(500) // base_amount
            .u64(1_000) // quote limit
            .u64(0)
            .u64(0)
            .u64(pool_base)
            .u64(pool_quote);
        for v in 0..7u64 {
            b = b.u64(v);
        }
        b = b.pubkey(pool);
        for _ in 0..5 {
            b = b.pubkey(&Pubkey::new_unique());
        }
        b.build()
    }

    #[test]
    fn test_decode_buy_event() {
        let pool = Pubkey::new_unique();
        let data = trade_event_data(true, &pool, 9_000, 4_000);
        let event = decode_trade_event(&data, true).unwrap();
        assert!(event.is_buy);
        assert_eq!(event.timestamp, 1_736_000_000);
        assert_eq!(event.base_amount, 500);
        assert_eq!(event.pool_base_token_reserves, 9_000);
        assert_eq!(event.pool_quote_token_reserves, 4_000);
        assert_eq!(event.pool, pool);
    }

    #[test]
    fn test_decode_sell_event_truncated() {
        let data = trade_event_data(false, &Pubkey::new_unique(), 1, 1);
        assert!(decode_trade_event(&data[..data.len() - 1], false).is_err());
    }
}
