//! gRPC 模块 - Yellowstone 交易转换
//!
//! 把 Yellowstone geyser 推送的 `Transaction` / `TransactionStatusMeta` 转换成与来源无关的
//! 交易模型。订阅与连接管理由调用方负责。

pub mod convert;

// 重新导出主要API
pub use convert::{convert_grpc_transaction, parse_grpc_transaction};
