//! 兑换还原核心模块
//!
//! 提供从一笔已确认交易还原兑换的完整流程：
//! - 交易数据模型（与 RPC / gRPC 来源无关）
//! - 按协议组装兑换腿
//! - 兑换腿对账，输出统一的 [`SwapInfo`]
//! - 池子快照填充

pub mod account_fillers; // 池子账户填充器
pub mod assemblers;      // 按协议的兑换腿组装
pub mod error;
pub mod events;          // 事件与输出类型
pub mod parser;          // 单笔交易解析入口
pub mod reconciler;      // 兑换腿对账
pub mod transaction;     // 交易数据模型

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{ParseError, ParseResult};
pub use events::*;
pub use parser::{parse, Parser};
pub use transaction::{InnerInstructions, Instruction, TokenBalance, TransactionData, TransactionMeta};
