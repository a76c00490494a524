//! PumpSwap：双边转账按 authority 区分输入/输出，同时保留 Buy/Sell 事件

use super::{direction_of, log_legs, self_event_leg, Scope};
use crate::core::events::SwapLeg;
use crate::core::parser::Parser;
use crate::instr::registry::ProtocolSpec;
use crate::instr::transfer::extract_transfer;

pub fn assemble(parser: &Parser<'_>, spec: &ProtocolSpec, scope: Scope<'_>) -> Vec<SwapLeg> {
    let keys = parser.account_keys();
    let tokens = parser.token_info();

    let mut legs = Vec::new();
    for ix in scope.inner {
        if let Some(transfer) = extract_transfer(ix, keys, tokens) {
            let direction = direction_of(parser, &transfer);
            legs.push(SwapLeg::directed(spec.protocol, direction, transfer));
        } else {
            legs.extend(self_event_leg(parser, spec, ix));
        }
    }
    log_legs(spec, &scope, &legs);
    legs
}
