//! 直接转账型 AMM（Raydium / Orca / Meteora / Axiom / Launchpad / DBC）
//!
//! 遍历 inner 指令，每条基础转账打上协议标签；协议有自记录事件时一并输出事件腿。

use super::{log_legs, self_event_leg, Scope};
use crate::core::events::SwapLeg;
use crate::core::parser::Parser;
use crate::instr::registry::ProtocolSpec;
use crate::instr::transfer::extract_transfer;

pub fn assemble(parser: &Parser<'_>, spec: &ProtocolSpec, scope: Scope<'_>) -> Vec<SwapLeg> {
    let keys = parser.account_keys();
    let tokens = parser.token_info();
    let has_events = !spec.event_discriminators.is_empty();

    let mut legs = Vec::new();
    for ix in scope.inner {
        if let Some(transfer) = extract_transfer(ix, keys, tokens) {
            legs.push(SwapLeg::transfer(spec.protocol, transfer));
        } else if has_events {
            legs.extend(self_event_leg(parser, spec, ix));
        }
    }
    log_legs(spec, &scope, &legs);
    legs
}
