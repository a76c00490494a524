//! 基础转账提取器
//!
//! 三种基础指令是没有自记录事件时唯一可见的资产移动：
//! - System Program transfer
//! - SPL Token transfer
//! - SPL Token / Token-2022 transferChecked
//!
//! 每种都是 "识别 + 解码" 两步；账户下标越界一律视为不匹配。

use solana_sdk::pubkey::Pubkey;

use super::program_ids::{SYSTEM_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID, WSOL_DECIMALS, WSOL_MINT};
use super::utils::{read_u32_le, read_u64_le, read_u8};
use crate::accounts::{AccountKeys, TokenInfoMap};
use crate::core::events::{TransferKind, TransferRecord};
use crate::core::transaction::Instruction;

/// System Program `Transfer` (u32 LE 指令号 2)
pub const NATIVE_TRANSFER_OPCODE: u8 = 2;
/// SPL Token `Transfer`
pub const TOKEN_TRANSFER_OPCODE: u8 = 3;
/// SPL Token `TransferChecked`
pub const TOKEN_TRANSFER_CHECKED_OPCODE: u8 = 12;

/// 原生转账金额偏移（4 字节指令号之后）
const NATIVE_AMOUNT_OFFSET: usize = 4;
/// token 转账金额偏移（1 字节 opcode 之后）
const TOKEN_AMOUNT_OFFSET: usize = 1;
/// transferChecked 载荷中 decimals 的偏移
const CHECKED_DECIMALS_OFFSET: usize = 9;

const MIN_TRANSFER_DATA_LEN: usize = 9;

#[inline]
fn program_is(ix: &Instruction, keys: &AccountKeys, program: &Pubkey) -> bool {
    keys.program_id(ix) == Some(program)
}

// ============================================================================
// Native transfer
// ============================================================================

pub fn is_native_transfer(ix: &Instruction, keys: &AccountKeys) -> bool {
    program_is(ix, keys, &SYSTEM_PROGRAM_ID)
        && ix.data.len() >= MIN_TRANSFER_DATA_LEN
        && read_u32_le(&ix.data, 0) == Some(NATIVE_TRANSFER_OPCODE as u32)
        && ix.accounts.len() >= 2
        && keys.in_range(ix)
}

/// accounts: [from, to]
pub fn decode_native_transfer(ix: &Instruction, keys: &AccountKeys) -> Option<TransferRecord> {
    if !is_native_transfer(ix, keys) {
        return None;
    }
    let amount = read_u64_le(&ix.data, NATIVE_AMOUNT_OFFSET)?;
    let source = keys.account(ix, 0)?;
    let destination = keys.account(ix, 1)?;
    Some(TransferRecord {
        kind: TransferKind::Native,
        source,
        destination,
        authority: source,
        mint: Some(WSOL_MINT),
        amount,
        decimals: WSOL_DECIMALS,
    })
}

// ============================================================================
// Token transfer
// ============================================================================

pub fn is_token_transfer(ix: &Instruction, keys: &AccountKeys) -> bool {
    program_is(ix, keys, &TOKEN_PROGRAM_ID)
        && ix.data.len() >= MIN_TRANSFER_DATA_LEN
        && ix.data[0] == TOKEN_TRANSFER_OPCODE
        && ix.accounts.len() >= 3
        && keys.in_range(ix)
}

/// accounts: [source, destination, authority]，资产按 destination 查表
pub fn decode_token_transfer(
    ix: &Instruction,
    keys: &AccountKeys,
    tokens: &TokenInfoMap,
) -> Option<TransferRecord> {
    if !is_token_transfer(ix, keys) {
        return None;
    }
    let amount = read_u64_le(&ix.data, TOKEN_AMOUNT_OFFSET)?;
    let source = keys.account(ix, 0)?;
    let destination = keys.account(ix, 1)?;
    let authority = keys.account(ix, 2)?;
    let info = tokens.get(&destination);
    Some(TransferRecord {
        kind: TransferKind::Token,
        source,
        destination,
        authority,
        mint: info.map(|i| i.mint),
        amount,
        decimals: info.map(|i| i.decimals).unwrap_or_default(),
    })
}

// ============================================================================
// Token transferChecked
// ============================================================================

pub fn is_token_transfer_checked(ix: &Instruction, keys: &AccountKeys) -> bool {
    (program_is(ix, keys, &TOKEN_PROGRAM_ID) || program_is(ix, keys, &TOKEN_2022_PROGRAM_ID))
        && ix.data.len() >= MIN_TRANSFER_DATA_LEN
        && ix.data[0] == TOKEN_TRANSFER_CHECKED_OPCODE
        && ix.accounts.len() >= 4
        && keys.in_range(ix)
}

/// accounts: [source, mint, destination, authority]
///
/// decimals 优先取余额快照中该 mint 的精度，缺失时退回载荷里的 decimals 字节。
pub fn decode_token_transfer_checked(
    ix: &Instruction,
    keys: &AccountKeys,
    tokens: &TokenInfoMap,
) -> Option<TransferRecord> {
    if !is_token_transfer_checked(ix, keys) {
        return None;
    }
    let amount = read_u64_le(&ix.data, TOKEN_AMOUNT_OFFSET)?;
    let source = keys.account(ix, 0)?;
    let mint = keys.account(ix, 1)?;
    let destination = keys.account(ix, 2)?;
    let authority = keys.account(ix, 3)?;
    let decimals = tokens
        .decimals_of(&mint)
        .or_else(|| read_u8(&ix.data, CHECKED_DECIMALS_OFFSET))
        .unwrap_or_default();
    Some(TransferRecord {
        kind: TransferKind::TokenChecked,
        source,
        destination,
        authority,
        mint: Some(mint),
        amount,
        decimals,
    })
}

/// 依次尝试 transferChecked、transfer、native transfer
pub fn extract_transfer(
    ix: &Instruction,
    keys: &AccountKeys,
    tokens: &TokenInfoMap,
) -> Option<TransferRecord> {
    decode_token_transfer_checked(ix, keys, tokens)
        .or_else(|| decode_token_transfer(ix, keys, tokens))
        .or_else(|| decode_native_transfer(ix, keys))
}
