//! 自记录事件解码的通用工具
//!
//! 所有自记录事件共享同一线格式：16 字节 discriminator 之后是固定字段布局，
//! 公钥 32 字节、整数小端、bool 1 字节、字符串为 4 字节长度前缀 + 内容。
//!
//! 两种解码器实现由 feature 选择：
//! - `parse-borsh`（默认）：`borsh` derive 的线格式结构体，按前缀解码，忽略尾部字节
//! - `parse-zero-copy`：[`EventReader`] 游标直接读取，不构造中间结构体
//!
//! 任一实现都不会返回部分记录：长度不足即 `DecodeFailure`。

use solana_sdk::pubkey::Pubkey;

use crate::core::error::{ParseError, ParseResult};

/// 16 字节 discriminator 之后的事件数据
#[inline]
pub fn event_payload<'a>(event: &'static str, data: &'a [u8]) -> ParseResult<&'a [u8]> {
    data.get(16..).ok_or_else(|| ParseError::short_buffer(event, 16, data.len()))
}

/// Borsh 前缀解码（不要求消费完全部字节）
#[cfg(not(feature = "parse-zero-copy"))]
#[inline]
pub fn borsh_prefix<T: borsh::BorshDeserialize>(event: &'static str, data: &[u8]) -> ParseResult<T> {
    let mut buf = data;
    T::deserialize(&mut buf).map_err(|e| ParseError::decode(event, e))
}

/// 带边界检查的小端游标
pub struct EventReader<'a> {
    event: &'static str,
    data: &'a [u8],
    offset: usize,
}

impl<'a> EventReader<'a> {
    pub fn new(event: &'static str, data: &'a [u8]) -> Self {
        Self { event, data, offset: 0 }
    }

    #[inline]
    fn take(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        let end = self.offset + len;
        let slice = self
            .data
            .get(self.offset..end)
            .ok_or_else(|| ParseError::short_buffer(self.event, end, self.data.len()))?;
        self.offset = end;
        Ok(slice)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let slice = self.take(N)?;
        slice.try_into().map_err(|_| ParseError::short_buffer(self.event, N, slice.len()))
    }

    pub fn u8(&mut self) -> ParseResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    pub fn bool(&mut self) -> ParseResult<bool> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ParseError::decode(self.event, format!("invalid bool byte {}", other))),
        }
    }

    pub fn u32(&mut self) -> ParseResult<u32> {
        self.array().map(u32::from_le_bytes)
    }

    pub fn u64(&mut self) -> ParseResult<u64> {
        self.array().map(u64::from_le_bytes)
    }

    pub fn i64(&mut self) -> ParseResult<i64> {
        self.array().map(i64::from_le_bytes)
    }

    pub fn u128(&mut self) -> ParseResult<u128> {
        self.array().map(u128::from_le_bytes)
    }

    pub fn pubkey(&mut self) -> ParseResult<Pubkey> {
        self.array().map(Pubkey::new_from_array)
    }

    /// 4 字节长度前缀字符串
    pub fn string(&mut self) -> ParseResult<String> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| ParseError::decode(self.event, e))
    }
}
