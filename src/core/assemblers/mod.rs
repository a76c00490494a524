//! 按协议的兑换腿组装
//!
//! 每条顶层指令按程序 ID 分派到唯一一种组装策略，未注册的程序走兜底组装器。
//! 单条指令解码失败只会让该指令不产出兑换腿，不影响整笔交易。
//!
//! 分派分两轮：
//! 1. 独占协议（Jupiter / Moonshot / OKX / Axiom / Meteora）：只要产出了兑换腿就直接返回
//! 2. 其余顶层指令逐条分派

pub mod catch_all;
pub mod direct;
pub mod moonshot;
pub mod pumpswap;
pub mod router;
pub mod self_event;

use log::{debug, warn};

use super::events::{Direction, SwapLeg, TransferRecord};
use super::parser::Parser;
use super::transaction::Instruction;
use crate::instr::registry::{self, ProtocolSpec, Strategy};
use crate::instr::{decode_self_event, match_self_event};

/// 组装器的输入范围
///
/// 顶层分派时 `entry` 为顶层指令、`inner` 为它的全部 inner 指令；
/// 路由委托时 `entry` 为空、`inner` 只包含属于该协议的片段。
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub index: usize,
    pub entry: Option<&'a Instruction>,
    pub inner: &'a [Instruction],
}

impl<'a> Scope<'a> {
    pub fn top_level(parser: &Parser<'a>, index: usize) -> Option<Self> {
        let entry = parser.instructions().get(index)?;
        Some(Self { index, entry: Some(entry), inner: parser.inner_instructions_of(index) })
    }
}

/// 对所有顶层指令运行组装流程
pub fn detect_swap_legs(parser: &Parser<'_>) -> Vec<SwapLeg> {
    let keys = parser.account_keys();
    let mut legs = Vec::new();

    // 第一轮：独占协议
    for (index, ix) in parser.instructions().iter().enumerate() {
        let Some(spec) = keys.program_id(ix).and_then(registry::lookup) else { continue };
        if !spec.exclusive {
            continue;
        }
        if let Some(scope) = Scope::top_level(parser, index) {
            legs.extend(assemble(parser, spec, scope));
        }
    }
    if !legs.is_empty() {
        return legs;
    }

    // 第二轮
    for (index, ix) in parser.instructions().iter().enumerate() {
        let Some(scope) = Scope::top_level(parser, index) else { continue };
        match keys.program_id(ix).and_then(registry::lookup) {
            Some(spec) if spec.exclusive => {}
            Some(spec) => legs.extend(assemble(parser, spec, scope)),
            None => legs.extend(catch_all::assemble(parser, scope)),
        }
    }
    legs
}

/// 按策略分派到对应组装器
pub fn assemble(parser: &Parser<'_>, spec: &'static ProtocolSpec, scope: Scope<'_>) -> Vec<SwapLeg> {
    match spec.strategy {
        Strategy::DirectTransfer => direct::assemble(parser, spec, scope),
        Strategy::BondingCurveEvent | Strategy::Aggregator => self_event::assemble(parser, spec, scope),
        Strategy::TwoSided => pumpswap::assemble(parser, spec, scope),
        Strategy::BondingCurveEntry => moonshot::assemble(parser, spec, scope),
        Strategy::CompoundRouter => router::assemble_compound(parser, spec, scope),
        Strategy::Router => router::assemble(parser, scope),
    }
}

// ============================================================================
// 共用工具
// ============================================================================

/// 自记录事件 -> 事件腿；解码失败记录日志后跳过
pub(crate) fn self_event_leg(parser: &Parser<'_>, spec: &ProtocolSpec, ix: &Instruction) -> Option<SwapLeg> {
    let disc = match_self_event(ix, parser.account_keys(), spec)?;
    match decode_self_event(spec.protocol, &disc, &ix.data) {
        Ok(event) => Some(SwapLeg::event(spec.protocol, event)),
        Err(e) => {
            warn!("{} event {} skipped: {}", spec.protocol, hex::encode(disc), e);
            None
        }
    }
}

/// authority 为签名者即输入（user -> pool），否则为输出
#[inline]
pub(crate) fn direction_of(parser: &Parser<'_>, transfer: &TransferRecord) -> Direction {
    if transfer.authority == parser.signer() {
        Direction::Input
    } else {
        Direction::Output
    }
}

pub(crate) fn log_legs(spec: &ProtocolSpec, scope: &Scope<'_>, legs: &[SwapLeg]) {
    debug!("{} produced {} leg(s) for instruction #{}", spec.protocol, legs.len(), scope.index);
}
