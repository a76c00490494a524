use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use yellowstone_grpc_proto::prelude::{
    InnerInstructions as GrpcInnerInstructions, TokenBalance as GrpcTokenBalance, Transaction,
    TransactionStatusMeta,
};

use crate::core::error::{ParseError, ParseResult};
use crate::core::events::SwapInfo;
use crate::core::parser::Parser;
use crate::core::transaction::{
    InnerInstructions, Instruction, TokenBalance, TransactionData, TransactionMeta,
};

/// 解析一笔 gRPC 推送的交易
#[inline]
pub fn parse_grpc_transaction(
    transaction: &Transaction,
    meta: &TransactionStatusMeta,
    slot: u64,
    block_time: Option<i64>,
) -> ParseResult<SwapInfo> {
    let (tx, meta) = convert_grpc_transaction(transaction, meta, slot, block_time)?;
    Parser::parse(&tx, &meta)?.parse_swap()
}

/// gRPC 消息 -> 交易模型
///
/// 账户列表顺序与链上一致：静态账户，随后是地址表加载的可写、只读账户。
pub fn convert_grpc_transaction(
    transaction: &Transaction,
    meta: &TransactionStatusMeta,
    slot: u64,
    block_time: Option<i64>,
) -> ParseResult<(TransactionData, TransactionMeta)> {
    let msg = transaction
        .message
        .as_ref()
        .ok_or_else(|| ParseError::MissingField("transaction.message".to_string()))?;

    let signatures = transaction
        .signatures
        .iter()
        .map(|s| {
            Signature::try_from(s.as_slice())
                .map_err(|_| ParseError::ConversionError(format!("invalid signature length {}", s.len())))
        })
        .collect::<ParseResult<Vec<_>>>()?;

    let mut instructions = Vec::with_capacity(msg.instructions.len());
    for ix in &msg.instructions {
        instructions.push(Instruction::new(narrow(ix.program_id_index)?, ix.accounts.clone(), ix.data.clone()));
    }

    let tx = TransactionData {
        signatures,
        account_keys: to_pubkeys(&msg.account_keys)?,
        instructions,
        slot,
        block_time,
    };

    let meta = TransactionMeta {
        inner_instructions: meta
            .inner_instructions
            .iter()
            .map(convert_inner)
            .collect::<ParseResult<Vec<_>>>()?,
        pre_token_balances: convert_balances(&meta.pre_token_balances)?,
        post_token_balances: convert_balances(&meta.post_token_balances)?,
        loaded_writable_addresses: to_pubkeys(&meta.loaded_writable_addresses)?,
        loaded_readonly_addresses: to_pubkeys(&meta.loaded_readonly_addresses)?,
        log_messages: meta.log_messages.clone(),
    };
    Ok((tx, meta))
}

fn convert_inner(group: &GrpcInnerInstructions) -> ParseResult<InnerInstructions> {
    let mut instructions = Vec::with_capacity(group.instructions.len());
    for ix in &group.instructions {
        instructions.push(Instruction::new(narrow(ix.program_id_index)?, ix.accounts.clone(), ix.data.clone()));
    }
    Ok(InnerInstructions { index: narrow(group.index)?, instructions })
}

fn convert_balances(balances: &[GrpcTokenBalance]) -> ParseResult<Vec<TokenBalance>> {
    balances
        .iter()
        .map(|b| {
            let amount = b
                .ui_token_amount
                .as_ref()
                .ok_or_else(|| ParseError::MissingField("token_balance.ui_token_amount".to_string()))?;
            Ok(TokenBalance {
                account_index: narrow(b.account_index)?,
                mint: b
                    .mint
                    .parse::<Pubkey>()
                    .map_err(|e| ParseError::ConversionError(format!("invalid mint {}: {}", b.mint, e)))?,
                decimals: narrow(amount.decimals)?,
                amount: amount.amount.parse::<u64>().map_err(|e| {
                    ParseError::ConversionError(format!("invalid token amount {}: {}", amount.amount, e))
                })?,
            })
        })
        .collect()
}

#[inline]
fn to_pubkeys(raw: &[Vec<u8>]) -> ParseResult<Vec<Pubkey>> {
    raw.iter()
        .map(|k| {
            Pubkey::try_from(k.as_slice())
                .map_err(|_| ParseError::ConversionError(format!("invalid pubkey length {}", k.len())))
        })
        .collect()
}

/// 账户下标在链上是 u8，protobuf 里用 u32 传输
#[inline]
fn narrow(v: u32) -> ParseResult<u8> {
    u8::try_from(v).map_err(|_| ParseError::ConversionError(format!("index {} out of u8 range", v)))
}
