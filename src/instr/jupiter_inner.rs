//! Jupiter v6 Inner Instruction 解析器
//!
//! 每经过一个 AMM，Jupiter 都会 emit_cpi 一条 SwapEvent。

use crate::core::error::ParseResult;
use crate::core::events::JupiterSwapEvent;
use super::inner_common::event_payload;

/// Jupiter inner instruction discriminators (16 bytes)
pub mod discriminators {
    pub const SWAP_EVENT: [u8; 16] = [
        228, 69, 165, 46, 81, 203, 154, 29,
        64, 198, 205, 232, 38, 8, 113, 226,
    ];
}

const SWAP_EVENT: &str = "JupiterSwapEvent";

/// 解析 SwapEvent（`data` 含 discriminator）
#[inline]
pub fn decode_swap_event(data: &[u8]) -> ParseResult<JupiterSwapEvent> {
    let payload = event_payload(SWAP_EVENT, data)?;

    #[cfg(not(feature = "parse-zero-copy"))]
    {
        use borsh::BorshDeserialize;
        use solana_sdk::pubkey::Pubkey;

        #[derive(BorshDeserialize)]
        struct SwapEventWire {
            amm: [u8; 32],
            input_mint: [u8; 32],
            input_amount: u64,
            output_mint: [u8; 32],
            output_amount: u64,
        }

        let w: SwapEventWire = super::inner_common::borsh_prefix(SWAP_EVENT, payload)?;
        Ok(JupiterSwapEvent {
            amm: Pubkey::new_from_array(w.amm),
            input_mint: Pubkey::new_from_array(w.input_mint),
            input_amount: w.input_amount,
            output_mint: Pubkey::new_from_array(w.output_mint),
            output_amount: w.output_amount,
        })
    }

    #[cfg(feature = "parse-zero-copy")]
    {
        let mut r = super::inner_common::EventReader::new(SWAP_EVENT, payload);
        Ok(JupiterSwapEvent {
            amm: r.pubkey()?,
            input_mint: r.pubkey()?,
            input_amount: r.u64()?,
            output_mint: r.pubkey()?,
            output_amount: r.u64()?,
        })
    }
}
