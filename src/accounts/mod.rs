//! 账户解析
//!
//! - [`AccountKeys`]：全局账户列表（静态账户 + ALT 加载的可写账户 + 只读账户）
//! - [`token::TokenInfoMap`]：token 账户 -> (mint, decimals)

pub mod token;

pub use token::{TokenInfo, TokenInfoMap};

use solana_sdk::pubkey::Pubkey;

use crate::core::transaction::Instruction;

/// 全局账户列表
///
/// 顺序固定为：静态账户，然后 loaded writable，然后 loaded readonly，不去重。
/// 指令里的每个账户下标都指向这个列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountKeys {
    keys: Vec<Pubkey>,
}

impl AccountKeys {
    pub fn resolve(
        static_keys: &[Pubkey],
        loaded_writable: &[Pubkey],
        loaded_readonly: &[Pubkey],
    ) -> Self {
        let mut keys =
            Vec::with_capacity(static_keys.len() + loaded_writable.len() + loaded_readonly.len());
        keys.extend_from_slice(static_keys);
        keys.extend_from_slice(loaded_writable);
        keys.extend_from_slice(loaded_readonly);
        Self { keys }
    }

    #[inline]
    pub fn get(&self, index: u8) -> Option<&Pubkey> {
        self.keys.get(index as usize)
    }

    /// 指令所属程序；下标越界返回 None
    #[inline]
    pub fn program_id(&self, ix: &Instruction) -> Option<&Pubkey> {
        self.get(ix.program_id_index)
    }

    /// 指令第 `position` 个账户
    #[inline]
    pub fn account(&self, ix: &Instruction, position: usize) -> Option<Pubkey> {
        ix.accounts.get(position).and_then(|&idx| self.get(idx)).copied()
    }

    /// 指令的所有账户下标都在范围内
    #[inline]
    pub fn in_range(&self, ix: &Instruction) -> bool {
        ix.accounts.iter().all(|&idx| (idx as usize) < self.keys.len())
    }

    #[inline]
    pub fn contains(&self, key: &Pubkey) -> bool {
        self.keys.contains(key)
    }

    pub fn as_slice(&self) -> &[Pubkey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
