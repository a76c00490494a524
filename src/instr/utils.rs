//! 指令解析通用工具函数

use crate::accounts::AccountKeys;
use crate::core::transaction::Instruction;
use super::registry::ProtocolSpec;

/// 从指令数据中读取 u64（小端序）
#[inline(always)]
pub fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    data.get(offset..offset + 8)
        .and_then(|slice| slice.try_into().ok())
        .map(u64::from_le_bytes)
}

/// 从指令数据中读取 u32（小端序）
#[inline(always)]
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    data.get(offset..offset + 4)
        .and_then(|slice| slice.try_into().ok())
        .map(u32::from_le_bytes)
}

/// 从指令数据中读取 u8
#[inline(always)]
pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

/// 自记录事件（CPI-to-self）的 16 字节 discriminator
#[inline(always)]
pub fn event_discriminator(data: &[u8]) -> Option<[u8; 16]> {
    data.get(..16).and_then(|slice| slice.try_into().ok())
}

// ============================================================================
// 分类器
// ============================================================================

/// 自记录事件指令：属于该协议、只有 1 个账户、数据 ≥ 16 字节且 discriminator 命中
pub fn is_self_event(
    ix: &Instruction,
    keys: &AccountKeys,
    spec: &ProtocolSpec,
    discriminator: &[u8; 16],
) -> bool {
    if ix.accounts.len() != 1 || !keys.in_range(ix) {
        return false;
    }
    match (keys.program_id(ix), event_discriminator(&ix.data)) {
        (Some(program_id), Some(head)) => spec.owns(program_id) && head == *discriminator,
        _ => false,
    }
}

/// 命中该协议任一交易事件 discriminator 时返回它
pub fn match_self_event(
    ix: &Instruction,
    keys: &AccountKeys,
    spec: &ProtocolSpec,
) -> Option<[u8; 16]> {
    spec.event_discriminators
        .iter()
        .find(|d| is_self_event(ix, keys, spec, d))
        .copied()
}

/// 池子发现指令：属于该协议且账户数量/固定账户满足布局要求
pub fn is_pool_instruction(ix: &Instruction, keys: &AccountKeys, spec: &ProtocolSpec) -> bool {
    let Some(layout) = spec.pool_layout else { return false };
    if !layout.arity.matches(ix.accounts.len()) || !keys.in_range(ix) {
        return false;
    }
    if !keys.program_id(ix).is_some_and(|id| spec.owns(id)) {
        return false;
    }
    match layout.guard {
        Some((position, expected)) => keys.account(ix, position) == Some(expected),
        None => true,
    }
}
