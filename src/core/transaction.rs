//! 归一化的交易输入模型
//!
//! RPC（`rpc_parser`）与 Yellowstone gRPC（`grpc`）两种来源都先转换成这里的结构，
//! 之后的解析流程只认这一种形状。指令数据已经是解码后的原始字节。

use serde::Serialize;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// 一条已编译指令（顶层或 inner 指令统一为同一形状）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// 程序在全局账户列表中的下标
    pub program_id_index: u8,
    /// 账户下标列表（指向全局账户列表）
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id_index: u8, accounts: Vec<u8>, data: Vec<u8>) -> Self {
        Self { program_id_index, accounts, data }
    }
}

/// 某条顶层指令执行期间产生的 inner 指令组
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InnerInstructions {
    /// 所属顶层指令的位置
    pub index: u8,
    pub instructions: Vec<Instruction>,
}

/// Token 余额快照（pre / post）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenBalance {
    pub account_index: u8,
    pub mint: Pubkey,
    pub decimals: u8,
    pub amount: u64,
}

/// 交易本体
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionData {
    pub signatures: Vec<Signature>,
    /// 静态账户列表
    pub account_keys: Vec<Pubkey>,
    pub instructions: Vec<Instruction>,
    pub slot: u64,
    /// 出块时间（Unix 秒）
    pub block_time: Option<i64>,
}

/// 执行元数据
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionMeta {
    pub inner_instructions: Vec<InnerInstructions>,
    pub pre_token_balances: Vec<TokenBalance>,
    pub post_token_balances: Vec<TokenBalance>,
    /// 地址查找表加载的可写账户
    pub loaded_writable_addresses: Vec<Pubkey>,
    /// 地址查找表加载的只读账户
    pub loaded_readonly_addresses: Vec<Pubkey>,
    pub log_messages: Vec<String>,
}
