//! 解析错误类型

use thiserror::Error;

/// 解析错误
///
/// 单条指令级别的错误（`MalformedInstruction` / `DecodeFailure`）只会被记录日志并跳过，
/// 真正返回给调用方的通常只有 `NoSwapFound` / `AmbiguousSwap` / `NoCreationFound`。
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed instruction: {0}")]
    MalformedInstruction(String),

    #[error("Failed to decode {event}: {reason}")]
    DecodeFailure { event: &'static str, reason: String },

    #[error("No swap found in transaction")]
    NoSwapFound,

    #[error("Ambiguous swap: {inputs} input mint(s), {outputs} output mint(s)")]
    AmbiguousSwap { inputs: usize, outputs: usize },

    #[error("No mint creation found in transaction")]
    NoCreationFound,

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

impl ParseError {
    pub fn decode(event: &'static str, reason: impl ToString) -> Self {
        ParseError::DecodeFailure { event, reason: reason.to_string() }
    }

    /// 缓冲区长度不足
    pub fn short_buffer(event: &'static str, needed: usize, got: usize) -> Self {
        ParseError::DecodeFailure {
            event,
            reason: format!("buffer too short: need {} bytes, got {}", needed, got),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::AmbiguousSwap { inputs: 2, outputs: 1 };
        assert_eq!(err.to_string(), "Ambiguous swap: 2 input mint(s), 1 output mint(s)");

        let err = ParseError::short_buffer("PumpFunTradeEvent", 121, 40);
        assert_eq!(
            err.to_string(),
            "Failed to decode PumpFunTradeEvent: buffer too short: need 121 bytes, got 40"
        );
    }
}
