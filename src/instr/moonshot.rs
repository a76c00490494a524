//! Moonshot 指令解析器
//!
//! Moonshot 不记录交易事件，直接解码 buy/sell 入口指令的 `TradeParams`。
//!
//! Buy/Sell instruction account mapping:
//! 0: sender
//! 1: senderTokenAccount
//! 2: curveAccount
//! 3: curveTokenAccount
//! 4: dexFee
//! 5: helioFee
//! 6: mint
//! 7: configAccount

use crate::accounts::AccountKeys;
use crate::core::error::{ParseError, ParseResult};
use crate::core::events::MoonshotTradeEvent;
use crate::core::transaction::Instruction;
use super::inner_common::EventReader;

/// Moonshot instruction discriminators (8 bytes)
pub mod discriminators {
    pub const BUY: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];
    pub const SELL: [u8; 8] = [51, 230, 133, 164, 1, 127, 131, 173];
}

const MINT_ACCOUNT_POSITION: usize = 6;
const TRADE_PARAMS: &str = "MoonshotTradeParams";

/// 入口指令方向；不是 buy/sell 返回 None
#[inline]
pub fn trade_direction(data: &[u8]) -> Option<bool> {
    match data.get(..8)? {
        d if d == discriminators::BUY => Some(true),
        d if d == discriminators::SELL => Some(false),
        _ => None,
    }
}

/// 解码 buy/sell 入口指令
pub fn decode_trade(ix: &Instruction, keys: &AccountKeys) -> ParseResult<MoonshotTradeEvent> {
    let is_buy = trade_direction(&ix.data).ok_or_else(|| {
        ParseError::MalformedInstruction("not a moonshot buy/sell instruction".to_string())
    })?;
    let mint = keys.account(ix, MINT_ACCOUNT_POSITION).ok_or_else(|| {
        ParseError::MalformedInstruction(format!(
            "moonshot trade has {} accounts, mint expected at {}",
            ix.accounts.len(),
            MINT_ACCOUNT_POSITION
        ))
    })?;

    let mut r = EventReader::new(TRADE_PARAMS, &ix.data[8..]);
    Ok(MoonshotTradeEvent {
        is_buy,
        mint,
        token_amount: r.u64()?,
        collateral_amount: r.u64()?,
        fixed_side: r.u8()?,
        slippage_bps: r.u64()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::Bytes;
    use crate::instr::program_ids::MOONSHOT_PROGRAM_ID;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn test_decode_sell() {
        let mut static_keys: Vec<Pubkey> = (0..8).map(|_| Pubkey::new_unique()).collect();
        static_keys.push(MOONSHOT_PROGRAM_ID);
        let keys = AccountKeys::resolve(&static_keys, &[], &[]);
        let data = Bytes::with(&discriminators::SELL).u64(1_000).u64(2_000).u8(1).u64(50).build();
        let ix = Instruction::new(8, (0..8).collect(), data);

        let trade = decode_trade(&ix, &keys).unwrap();
        assert!(!trade.is_buy);
        assert_eq!(trade.mint, static_keys[6]);
        assert_eq!(trade.token_amount, 1_000);
        assert_eq!(trade.collateral_amount, 2_000);
        assert_eq!(trade.fixed_side, 1);
        assert_eq!(trade.slippage_bps, 50);
    }

    #[test]
    fn test_decode_rejects_missing_mint_account() {
        let keys = AccountKeys::resolve(&[Pubkey::new_unique(), MOONSHOT_PROGRAM_ID], &[], &[]);
        let data = Bytes::with(&discriminators::BUY).u64(1).u64(2).u8(0).u64(3).build();
        let ix = Instruction::new(1, vec![0, 0, 0], data);
        assert!(matches!(decode_trade(&ix, &keys), Err(ParseError::MalformedInstruction(_))));
        assert_eq!(trade_direction(&[0u8; 4]), None);
    }
}
