//! Moonshot：解码 buy/sell 入口指令（顶层或被路由调用的 inner 指令）

use log::debug;

use super::{log_legs, Scope};
use crate::core::events::{ProtocolEvent, SwapLeg};
use crate::core::parser::Parser;
use crate::instr::moonshot::decode_trade;
use crate::instr::registry::ProtocolSpec;

pub fn assemble(parser: &Parser<'_>, spec: &ProtocolSpec, scope: Scope<'_>) -> Vec<SwapLeg> {
    let keys = parser.account_keys();
    let candidates = scope
        .entry
        .into_iter()
        .chain(scope.inner.iter())
        .filter(|ix| keys.program_id(ix).is_some_and(|id| spec.owns(id)))
        .filter(|ix| spec.matches_entry(&ix.data));

    let mut legs = Vec::new();
    for ix in candidates {
        match decode_trade(ix, keys) {
            Ok(trade) => legs.push(SwapLeg::event(spec.protocol, ProtocolEvent::MoonshotTrade(trade))),
            Err(e) => debug!("moonshot instruction skipped: {}", e),
        }
    }
    log_legs(spec, &scope, &legs);
    legs
}
