// 核心模块 - 扁平化结构
pub mod accounts; // 账户列表与代币信息
pub mod core;
pub mod instr;    // 指令与自记录事件解码

// gRPC 模块 - Yellowstone 交易转换
pub mod grpc;

// RPC 解析模块 - 支持直接从RPC解析交易
pub mod rpc_parser;

// 重新导出主要API
pub use core::{
    // 交易模型
    InnerInstructions, Instruction, TokenBalance, TransactionData, TransactionMeta,
    // 解析入口
    parse, Parser,
    // 输出类型
    Direction, LegPayload, PoolSnapshot, ProtocolEvent, SwapInfo, SwapLeg, TransferRecord,
    // 错误
    ParseError, ParseResult,
};
pub use instr::registry::Protocol;

// 导出 RPC 解析函数
pub use rpc_parser::{convert_rpc_transaction, parse_swap_from_rpc, parse_rpc_transaction};
