//! 指令解析器模块
//!
//! 包含协议注册表、基础转账提取器以及各协议自记录事件的解码器

pub mod inner_common;
pub mod jupiter_inner;
pub mod meteora_dbc_inner;
pub mod moonshot;
pub mod okx;
pub mod program_ids;
pub mod pump_amm_inner;
pub mod pump_inner;
pub mod raydium_launchpad_inner;
pub mod registry;
pub mod transfer;
pub mod utils;

// 重新导出工具函数
pub use registry::{Protocol, ProtocolSpec, Strategy};
pub use utils::*;

use crate::core::error::{ParseError, ParseResult};
use crate::core::events::ProtocolEvent;

/// 统一的自记录事件解码入口
///
/// `discriminator` 已由分类器确认属于 `protocol`；`data` 为完整指令数据。
#[inline]
pub fn decode_self_event(
    protocol: Protocol,
    discriminator: &[u8; 16],
    data: &[u8],
) -> ParseResult<ProtocolEvent> {
    match (protocol, discriminator) {
        (Protocol::PumpFun, &pump_inner::discriminators::TRADE_EVENT) => {
            pump_inner::decode_trade_event(data).map(ProtocolEvent::PumpFunTrade)
        }
        (Protocol::PumpSwap, &pump_amm_inner::discriminators::BUY_EVENT) => {
            pump_amm_inner::decode_trade_event(data, true).map(ProtocolEvent::PumpAmmTrade)
        }
        (Protocol::PumpSwap, &pump_amm_inner::discriminators::SELL_EVENT) => {
            pump_amm_inner::decode_trade_event(data, false).map(ProtocolEvent::PumpAmmTrade)
        }
        (Protocol::RaydiumLaunchpad, &raydium_launchpad_inner::discriminators::TRADE_EVENT) => {
            raydium_launchpad_inner::decode_trade_event(data).map(ProtocolEvent::RaydiumLaunchpadTrade)
        }
        (Protocol::MeteoraDbc, &meteora_dbc_inner::discriminators::EVT_SWAP) => {
            meteora_dbc_inner::decode_swap_event(data).map(ProtocolEvent::MeteoraDbcSwap)
        }
        (Protocol::Jupiter, &jupiter_inner::discriminators::SWAP_EVENT) => {
            jupiter_inner::decode_swap_event(data).map(ProtocolEvent::JupiterSwap)
        }
        _ => Err(ParseError::decode(
            "ProtocolEvent",
            format!("unhandled {} event {}", protocol, hex::encode(discriminator)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_self_event_dispatch() {
        let data = pump_inner::tests::trade_event_data(&pump_inner::tests::sample_trade(true));
        let event = decode_self_event(Protocol::PumpFun, &pump_inner::discriminators::TRADE_EVENT, &data);
        assert!(matches!(event, Ok(ProtocolEvent::PumpFunTrade(e)) if e.is_buy));

        // Launchpad 与 PumpFun TradeEvent 的 discriminator 相同，靠协议区分
        let err = decode_self_event(Protocol::Orca, &pump_inner::discriminators::TRADE_EVENT, &data);
        assert!(err.is_err());
    }
}
