//! Meteora Dynamic Bonding Curve Inner Instruction 解析器

use crate::core::error::ParseResult;
use crate::core::events::MeteoraDbcSwapEvent;
use super::inner_common::event_payload;

/// Meteora DBC inner instruction discriminators (16 bytes)
pub mod discriminators {
    pub const EVT_SWAP: [u8; 16] = [
        228, 69, 165, 46, 81, 203, 154, 29,
        27, 60, 21, 213, 138, 170, 187, 147,
    ];
}

const SWAP_EVENT: &str = "MeteoraDbcSwapEvent";

/// 解析 EvtSwap（`data` 含 discriminator）
#[inline]
pub fn decode_swap_event(data: &[u8]) -> ParseResult<MeteoraDbcSwapEvent> {
    let payload = event_payload(SWAP_EVENT, data)?;

    #[cfg(not(feature = "parse-zero-copy"))]
    {
        borsh_impl::swap_event(payload)
    }

    #[cfg(feature = "parse-zero-copy")]
    {
        zero_copy_impl::swap_event(payload)
    }
}

#[cfg(not(feature = "parse-zero-copy"))]
mod borsh_impl {
    use borsh::BorshDeserialize;
    use solana_sdk::pubkey::Pubkey;

    use super::*;
    use crate::instr::inner_common::borsh_prefix;

    #[derive(BorshDeserialize)]
    struct SwapParameters {
        amount_in: u64,
        minimum_amount_out: u64,
    }

    #[derive(BorshDeserialize)]
    struct SwapResult {
        actual_input_amount: u64,
        output_amount: u64,
        next_sqrt_price: u128,
        trading_fee: u64,
        protocol_fee: u64,
        referral_fee: u64,
    }

    #[derive(BorshDeserialize)]
    struct EvtSwapWire {
        pool: [u8; 32],
        config: [u8; 32],
        trade_direction: u8,
        has_referral: bool,
        params: SwapParameters,
        swap_result: SwapResult,
        amount_in: u64,
        current_timestamp: u64,
    }

    pub(super) fn swap_event(payload: &[u8]) -> ParseResult<MeteoraDbcSwapEvent> {
        let w: EvtSwapWire = borsh_prefix(SWAP_EVENT, payload)?;
        Ok(MeteoraDbcSwapEvent {
            pool: Pubkey::new_from_array(w.pool),
            config: Pubkey::new_from_array(w.config),
            trade_direction: w.trade_direction,
            has_referral: w.has_referral,
            amount_in_param: w.params.amount_in,
            minimum_amount_out: w.params.minimum_amount_out,
            actual_input_amount: w.swap_result.actual_input_amount,
            output_amount: w.swap_result.output_amount,
            next_sqrt_price: w.swap_result.next_sqrt_price,
            trading_fee: w.swap_result.trading_fee,
            protocol_fee: w.swap_result.protocol_fee,
            referral_fee: w.swap_result.referral_fee,
            amount_in: w.amount_in,
            current_timestamp: w.current_timestamp,
        })
    }
}

#[cfg(feature = "parse-zero-copy")]
mod zero_copy_impl {
    use super::*;
    use crate::instr::inner_common::EventReader;

    pub(super) fn swap_event(payload: &[u8]) -> ParseResult<MeteoraDbcSwapEvent> {
        let mut r = EventReader::new(SWAP_EVENT, payload);
        Ok(MeteoraDbcSwapEvent {
            pool: r.pubkey()?,
            config: r.pubkey()?,
            trade_direction: r.u8()?,
            has_referral: r.bool()?,
            amount_in_param: r.u64()?,
            minimum_amount_out: r.u64()?,
            actual_input_amount: r.u64()?,
            output_amount: r.u64()?,
            next_sqrt_price: r.u128()?,
            trading_fee: r.u64()?,
            protocol_fee: r.u64()?,
            referral_fee: r.u64()?,
            amount_in: r.u64()?,
            current_timestamp: r.u64()?,
        })
    }
}
