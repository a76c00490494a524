//! 测试用的合成交易构造器

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use super::transaction::*;
use crate::instr::transfer::{NATIVE_TRANSFER_OPCODE, TOKEN_TRANSFER_CHECKED_OPCODE, TOKEN_TRANSFER_OPCODE};

/// 小端字节拼接
#[derive(Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn with(prefix: &[u8]) -> Self {
        Self(prefix.to_vec())
    }
    pub fn pubkey(mut self, key: &Pubkey) -> Self {
        self.0.extend_from_slice(key.as_ref());
        self
    }
    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }
    pub fn bool(self, v: bool) -> Self {
        self.u8(v as u8)
    }
    pub fn u64(mut self, v: u64) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn i64(mut self, v: i64) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn u128(mut self, v: u128) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn string(mut self, s: &str) -> Self {
        self.0.extend_from_slice(&(s.len() as u32).to_le_bytes());
        self.0.extend_from_slice(s.as_bytes());
        self
    }
    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

pub fn native_transfer_data(amount: u64) -> Vec<u8> {
    Bytes::with(&(NATIVE_TRANSFER_OPCODE as u32).to_le_bytes()).u64(amount).build()
}

pub fn token_transfer_data(amount: u64) -> Vec<u8> {
    Bytes::with(&[TOKEN_TRANSFER_OPCODE]).u64(amount).build()
}

pub fn transfer_checked_data(amount: u64, decimals: u8) -> Vec<u8> {
    Bytes::with(&[TOKEN_TRANSFER_CHECKED_OPCODE]).u64(amount).u8(decimals).build()
}

/// 合成交易：第 0 个账户为签名者
pub struct TxBuilder {
    keys: Vec<Pubkey>,
    instructions: Vec<Instruction>,
    inner: Vec<InnerInstructions>,
    post_balances: Vec<TokenBalance>,
    block_time: Option<i64>,
}

impl TxBuilder {
    pub fn new(signer: Pubkey) -> Self {
        Self {
            keys: vec![signer],
            instructions: Vec::new(),
            inner: Vec::new(),
            post_balances: Vec::new(),
            block_time: None,
        }
    }

    pub fn key(&mut self, key: Pubkey) -> u8 {
        match self.keys.iter().position(|k| *k == key) {
            Some(i) => i as u8,
            None => {
                self.keys.push(key);
                (self.keys.len() - 1) as u8
            }
        }
    }

    fn compile(&mut self, program: Pubkey, accounts: &[Pubkey], data: Vec<u8>) -> Instruction {
        let program_id_index = self.key(program);
        let accounts = accounts.iter().map(|a| self.key(*a)).collect();
        Instruction { program_id_index, accounts, data }
    }

    /// 添加顶层指令，返回其位置
    pub fn top(&mut self, program: Pubkey, accounts: &[Pubkey], data: Vec<u8>) -> usize {
        let ix = self.compile(program, accounts, data);
        self.instructions.push(ix);
        self.instructions.len() - 1
    }

    pub fn inner(&mut self, top: usize, program: Pubkey, accounts: &[Pubkey], data: Vec<u8>) {
        let ix = self.compile(program, accounts, data);
        let index = top as u8;
        match self.inner.iter_mut().find(|set| set.index == index) {
            Some(set) => set.instructions.push(ix),
            None => self.inner.push(InnerInstructions { index, instructions: vec![ix] }),
        }
    }

    pub fn balance(&mut self, account: Pubkey, mint: Pubkey, decimals: u8) {
        let account_index = self.key(account);
        self.post_balances.push(TokenBalance { account_index, mint, decimals, amount: 0 });
    }

    pub fn block_time(&mut self, ts: i64) {
        self.block_time = Some(ts);
    }

    pub fn build(self) -> (TransactionData, TransactionMeta) {
        let tx = TransactionData {
            signatures: vec![Signature::default()],
            account_keys: self.keys,
            instructions: self.instructions,
            slot: 1,
            block_time: self.block_time,
        };
        let meta = TransactionMeta {
            inner_instructions: self.inner,
            post_token_balances: self.post_balances,
            ..Default::default()
        };
        (tx, meta)
    }
}
