//! Raydium Launchpad Inner Instruction 解析器

use crate::core::error::ParseResult;
use crate::core::events::RaydiumLaunchpadTradeEvent;
use super::inner_common::event_payload;

/// Raydium Launchpad inner instruction discriminators (16 bytes)
pub mod discriminators {
    pub const TRADE_EVENT: [u8; 16] = [
        228, 69, 165, 46, 81, 203, 154, 29,
        189, 219, 127, 211, 78, 230, 97, 238,
    ];
}

const TRADE_EVENT: &str = "RaydiumLaunchpadTradeEvent";

/// 解析 TradeEvent（`data` 含 discriminator）
#[inline]
pub fn decode_trade_event(data: &[u8]) -> ParseResult<RaydiumLaunchpadTradeEvent> {
    let payload = event_payload(TRADE_EVENT, data)?;

    #[cfg(not(feature = "parse-zero-copy"))]
    {
        borsh_impl::trade_event(payload)
    }

    #[cfg(feature = "parse-zero-copy")]
    {
        zero_copy_impl::trade_event(payload)
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
        pool_state: [u8; 32],
        total_base_sell: u64,
        virtual_base: u64,
        virtual_quote: u64,
        real_base_before: u64,
        real_quote_before: u64,
        real_base_after: u64,
        real_quote_after: u64,
        amount_in: u64,
        amount_out: u64,
        protocol_fee: u64,
        platform_fee: u64,
        share_fee: u64,
    }

    pub(super) fn trade_event(payload: &[u8]) -> ParseResult<RaydiumLaunchpadTradeEvent> {
        let w: TradeEventWire = borsh_prefix(TRADE_EVENT, payload)?;
        Ok(RaydiumLaunchpadTradeEvent {
            pool_state: Pubkey::new_from_array(w.pool_state),
            total_base_sell: w.total_base_sell,
            virtual_base: w.virtual_base,
            virtual_quote: w.virtual_quote,
            real_base_before: w.real_base_before,
            real_quote_before: w.real_quote_before,
            real_base_after: w.real_base_after,
            real_quote_after: w.real_quote_after,
            amount_in: w.amount_in,
            amount_out: w.amount_out,
            protocol_fee: w.protocol_fee,
            platform_fee: w.platform_fee,
            share_fee: w.share_fee,
        })
    }
}

#[cfg(feature = "parse-zero-copy")]
mod zero_copy_impl {
    use super::*;
    use crate::instr::inner_common::EventReader;

    pub(super) fn trade_event(payload: &[u8]) -> ParseResult<RaydiumLaunchpadTradeEvent> {
        let mut r = EventReader::new(TRADE_EVENT, payload);
        Ok(RaydiumLaunchpadTradeEvent {
            pool_state: r.pubkey()?,
            total_base_sell: r.u64()?,
            virtual_base: r.u64()?,
            virtual_quote: r.u64()?,
            real_base_before: r.u64()?,
            real_quote_before: r.u64()?,
            real_base_after: r.u64()?,
            real_quote_after: r.u64()?,
            amount_in: r.u64()?,
            amount_out: r.u64()?,
            protocol_fee: r.u64()?,
            platform_fee: r.u64()?,
            share_fee: r.u64()?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::test_utils::Bytes;
    use solana_sdk::pubkey::Pubkey;

    /// 字段依次取 values[0..12]
    pub(crate) fn trade_event_data(pool_state: &Pubkey, values: [u64; 12]) -> Vec<u8> {
        let mut b = Bytes::with(&discriminators::TRADE_EVENT).pubkey(pool_state);
        for v in values {
            b = b.u64(v);
        }
        // 之后的 trade_direction / pool_status 等字段
        b.u8(0).u8(1).build()
    }

    #[test]
    fn test_decode_trade_event() {
        let pool = Pubkey::new_unique();
        let data = trade_event_data(&pool, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        let event = decode_trade_event(&data).unwrap();
        assert_eq!(event.pool_state, pool);
        assert_eq!(event.total_base_sell, 1);
        assert_eq!(event.virtual_quote, 3);
        assert_eq!(event.real_base_after, 6);
        assert_eq!(event.real_quote_after, 7);
        assert_eq!(event.amount_out, 9);
        assert_eq!(event.share_fee, 12);
    }

    #[test]
    fn test_decode_trade_event_short() {
        let data = trade_event_data(&Pubkey::new_unique(), [0; 12]);
        assert!(decode_trade_event(&data[..16 + 32 + 8 * 11]).is_err());
    }
}
