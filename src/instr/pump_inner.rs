//! PumpFun Inner Instruction 解析器
//!
//! Inner instructions 使用 16 字节的 discriminator（与 8 字节的 instruction 不同），
//! 是程序通过 CPI 调用自身记录的事件。
//!
//! ## 解析器插件系统
//!
//! ### 1. Borsh 反序列化解析器（默认，推荐）
//! - **启用**: `cargo build --features parse-borsh` （默认）
//! - **优点**: 类型安全、代码简洁、易维护、自动验证
//!
//! ### 2. 零拷贝解析器
//! - **启用**: `cargo build --features parse-zero-copy --no-default-features`
//! - **优点**: 不构造中间结构体，适合超高频场景

use crate::core::error::ParseResult;
use crate::core::events::{PumpFunCreateEvent, PumpFunTradeEvent};
use super::inner_common::event_payload;

// ============================================================================
// Inner Instruction Discriminators (16 bytes)
// ============================================================================

/// PumpFun inner instruction discriminators
///
/// 前 8 字节为 anchor emit_cpi 固定前缀，后 8 字节为 sha256("event:<Name>")[..8]
pub mod discriminators {
    pub const TRADE_EVENT: [u8; 16] = [
        228, 69, 165, 46, 81, 203, 154, 29, // emit_cpi 前缀
        189, 219, 127, 211, 78, 230, 97, 238, // TradeEvent
    ];

    pub const CREATE_EVENT: [u8; 16] = [
        228, 69, 165, 46, 81, 203, 154, 29,
        27, 114, 169, 77, 222, 235, 99, 118,
    ];
}

const TRADE_EVENT: &str = "PumpFunTradeEvent";
const CREATE_EVENT: &str = "PumpFunCreateEvent";

// ============================================================================
// Trade 事件解析器
// ============================================================================

/// 解析 TradeEvent（`data` 含 16 字节 discriminator）
///
/// 根据编译时的 feature flag 自动选择解析器实现
#[inline]
pub fn decode_trade_event(data: &[u8]) -> ParseResult<PumpFunTradeEvent> {
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

/// 解析 CreateEvent（`data` 含 16 字节 discriminator）
#[inline]
pub fn decode_create_event(data: &[u8]) -> ParseResult<PumpFunCreateEvent> {
    let payload = event_payload(CREATE_EVENT, data)?;

    #[cfg(not(feature = "parse-zero-copy"))]
    {
        borsh_impl::create_event(payload)
    }

    #[cfg(feature = "parse-zero-copy")]
    {
        zero_copy_impl::create_event(payload)
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
        mint: [u8; 32],
        sol_amount: u64,
        token_amount: u64,
        is_buy: bool,
        user: [u8; 32],
        timestamp: i64,
        virtual_sol_reserves: u64,
        virtual_token_reserves: u64,
        real_sol_reserves: u64,
        real_token_reserves: u64,
    }

    #[derive(BorshDeserialize)]
    struct CreateEventWire {
        name: String,
        symbol: String,
        uri: String,
        mint: [u8; 32],
        bonding_curve: [u8; 32],
        user: [u8; 32],
    }

    pub(super) fn trade_event(payload: &[u8]) -> ParseResult<PumpFunTradeEvent> {
        let w: TradeEventWire = borsh_prefix(TRADE_EVENT, payload)?;
        Ok(PumpFunTradeEvent {
            mint: Pubkey::new_from_array(w.mint),
            sol_amount: w.sol_amount,
            token_amount: w.token_amount,
            is_buy: w.is_buy,
            user: Pubkey::new_from_array(w.user),
            timestamp: w.timestamp,
            virtual_sol_reserves: w.virtual_sol_reserves,
            virtual_token_reserves: w.virtual_token_reserves,
            real_sol_reserves: w.real_sol_reserves,
            real_token_reserves: w.real_token_reserves,
        })
    }

    pub(super) fn create_event(payload: &[u8]) -> ParseResult<PumpFunCreateEvent> {
        let w: CreateEventWire = borsh_prefix(CREATE_EVENT, payload)?;
        Ok(PumpFunCreateEvent {
            name: w.name,
            symbol: w.symbol,
            uri: w.uri,
            mint: Pubkey::new_from_array(w.mint),
            bonding_curve: Pubkey::new_from_array(w.bonding_curve),
            user: Pubkey::new_from_array(w.user),
        })
    }
}

#[cfg(feature = "parse-zero-copy")]
mod zero_copy_impl {
    use super::*;
    use crate::instr::inner_common::EventReader;

    pub(super) fn trade_event(payload: &[u8]) -> ParseResult<PumpFunTradeEvent> {
        let mut r = EventReader::new(TRADE_EVENT, payload);
        Ok(PumpFunTradeEvent {
            mint: r.pubkey()?,
            sol_amount: r.u64()?,
            token_amount: r.u64()?,
            is_buy: r.bool()?,
            user: r.pubkey()?,
            timestamp: r.i64()?,
            virtual_sol_reserves: r.u64()?,
            virtual_token_reserves: r.u64()?,
            real_sol_reserves: r.u64()?,
            real_token_reserves: r.u64()?,
        })
    }

    pub(super) fn create_event(payload: &[u8]) -> ParseResult<PumpFunCreateEvent> {
        let mut r = EventReader::new(CREATE_EVENT, payload);
        Ok(PumpFunCreateEvent {
            name: r.string()?,
            symbol: r.string()?,
            uri: r.string()?,
            mint: r.pubkey()?,
            bonding_curve: r.pubkey()?,
            user: r.pubkey()?,
        })
    }
}
