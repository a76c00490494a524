//! 只看自记录事件的组装器（PumpFun TradeEvent、Jupiter SwapEvent）

use super::{log_legs, self_event_leg, Scope};
use crate::core::events::SwapLeg;
use crate::core::parser::Parser;
use crate::instr::registry::ProtocolSpec;

pub fn assemble(parser: &Parser<'_>, spec: &ProtocolSpec, scope: Scope<'_>) -> Vec<SwapLeg> {
    let legs: Vec<SwapLeg> = scope.inner.iter().filter_map(|ix| self_event_leg(parser, spec, ix)).collect();
    log_legs(spec, &scope, &legs);
    legs
}
