//! Token 账户信息表
//!
//! token 转账指令本身不带 mint，这里根据交易的 token 余额快照把
//! token 账户映射到 (mint, decimals)。

use std::collections::HashMap;

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use super::AccountKeys;
use crate::core::transaction::{Instruction, TokenBalance, TransactionMeta};
use crate::instr::program_ids::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID, WSOL_DECIMALS, WSOL_MINT};
use crate::instr::transfer::{TOKEN_TRANSFER_CHECKED_OPCODE, TOKEN_TRANSFER_OPCODE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub mint: Pubkey,
    pub decimals: u8,
}

#[derive(Debug, Clone, Default)]
pub struct TokenInfoMap {
    accounts: HashMap<Pubkey, TokenInfo>,
    decimals: HashMap<Pubkey, u8>,
}

impl TokenInfoMap {
    /// 构建信息表
    ///
    /// 1. post 余额，再用 pre 余额补齐（交易内被关闭的账户只出现在 pre 中）
    /// 2. 作为 token 转账 source/destination 出现、但没有任何余额记录的账户，
    ///    视为临时 WSOL 账户（9 位精度）
    pub fn build<'a>(
        keys: &AccountKeys,
        meta: &TransactionMeta,
        instructions: impl IntoIterator<Item = &'a Instruction>,
    ) -> Self {
        let mut map = Self::default();
        map.decimals.insert(WSOL_MINT, WSOL_DECIMALS);

        for balance in meta.post_token_balances.iter().chain(meta.pre_token_balances.iter()) {
            map.insert_balance(keys, balance);
        }

        for ix in instructions {
            let Some(program_id) = keys.program_id(ix) else { continue };
            if *program_id != TOKEN_PROGRAM_ID && *program_id != TOKEN_2022_PROGRAM_ID {
                continue;
            }
            let (source_pos, dest_pos) = match ix.data.first() {
                Some(&TOKEN_TRANSFER_OPCODE) => (0, 1),
                Some(&TOKEN_TRANSFER_CHECKED_OPCODE) => (0, 2),
                _ => continue,
            };
            for pos in [source_pos, dest_pos] {
                if let Some(account) = keys.account(ix, pos) {
                    map.accounts
                        .entry(account)
                        .or_insert(TokenInfo { mint: WSOL_MINT, decimals: WSOL_DECIMALS });
                }
            }
        }

        map
    }

    fn insert_balance(&mut self, keys: &AccountKeys, balance: &TokenBalance) {
        if balance.mint == Pubkey::default() {
            return;
        }
        if let Some(account) = keys.get(balance.account_index) {
            self.accounts
                .entry(*account)
                .or_insert(TokenInfo { mint: balance.mint, decimals: balance.decimals });
        }
        self.decimals.entry(balance.mint).or_insert(balance.decimals);
    }

    #[inline]
    pub fn get(&self, account: &Pubkey) -> Option<&TokenInfo> {
        self.accounts.get(account)
    }

    /// mint 的精度
    #[inline]
    pub fn decimals_of(&self, mint: &Pubkey) -> Option<u8> {
        self.decimals.get(mint).copied()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
