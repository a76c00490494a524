//! RPC Transaction Parser
//!
//! 把 RPC `getTransaction` 的返回转换成与来源无关的交易模型，再走兑换还原流程。
//! 只支持 base64 编码的交易（`max_supported_transaction_version = 0`）。

use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use log::debug;
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, UiInstruction, UiLoadedAddresses,
    UiTransactionEncoding, UiTransactionTokenBalance,
};

use crate::core::error::{ParseError, ParseResult};
use crate::core::events::SwapInfo;
use crate::core::parser::Parser;
use crate::core::transaction::{
    InnerInstructions, Instruction, TokenBalance, TransactionData, TransactionMeta,
};

/// Fetch a transaction by signature and reconstruct its swap
///
/// # Example
/// ```no_run
/// use solana_client::rpc_client::RpcClient;
/// use solana_sdk::signature::Signature;
/// use sol_swap_parser::parse_swap_from_rpc;
/// use std::str::FromStr;
///
/// let client = RpcClient::new("https://api.mainnet-beta.solana.com".to_string());
/// let sig = Signature::from_str("your-signature-here").unwrap();
/// let swap = parse_swap_from_rpc(&client, &sig).unwrap();
/// println!("{} -> {}", swap.token_in_mint, swap.token_out_mint);
/// ```
pub fn parse_swap_from_rpc(rpc_client: &RpcClient, signature: &Signature) -> ParseResult<SwapInfo> {
    // V0 交易需要显式声明支持版本
    let config = RpcTransactionConfig {
        encoding: Some(UiTransactionEncoding::Base64),
        commitment: None,
        max_supported_transaction_version: Some(0),
    };

    let rpc_tx = rpc_client
        .get_transaction_with_config(signature, config)
        .map_err(|e| ParseError::RpcError(e.to_string()))?;

    parse_rpc_transaction(&rpc_tx)
}

/// Reconstruct the swap of an already fetched RPC transaction
pub fn parse_rpc_transaction(rpc_tx: &EncodedConfirmedTransactionWithStatusMeta) -> ParseResult<SwapInfo> {
    let (tx, meta) = convert_rpc_transaction(rpc_tx)?;
    Parser::parse(&tx, &meta)?.parse_swap()
}

/// RPC 返回 -> 交易模型
pub fn convert_rpc_transaction(
    rpc_tx: &EncodedConfirmedTransactionWithStatusMeta,
) -> ParseResult<(TransactionData, TransactionMeta)> {
    let rpc_meta = rpc_tx
        .transaction
        .meta
        .as_ref()
        .ok_or_else(|| ParseError::MissingField("meta".to_string()))?;

    let versioned_tx = decode_transaction(&rpc_tx.transaction.transaction)?;
    let message = &versioned_tx.message;

    let tx = TransactionData {
        signatures: versioned_tx.signatures.clone(),
        account_keys: message.static_account_keys().to_vec(),
        instructions: message
            .instructions()
            .iter()
            .map(|ix| Instruction::new(ix.program_id_index, ix.accounts.clone(), ix.data.clone()))
            .collect(),
        slot: rpc_tx.slot,
        block_time: rpc_tx.block_time,
    };

    let loaded: Option<UiLoadedAddresses> = rpc_meta.loaded_addresses.clone().into();
    let (loaded_writable_addresses, loaded_readonly_addresses) = match loaded {
        Some(addrs) => (parse_pubkeys(&addrs.writable)?, parse_pubkeys(&addrs.readonly)?),
        None => (Vec::new(), Vec::new()),
    };

    let meta = TransactionMeta {
        inner_instructions: convert_inner_instructions(&rpc_meta.inner_instructions)?,
        pre_token_balances: convert_token_balances(&rpc_meta.pre_token_balances)?,
        post_token_balances: convert_token_balances(&rpc_meta.post_token_balances)?,
        loaded_writable_addresses,
        loaded_readonly_addresses,
        log_messages: {
            let opt: Option<Vec<String>> = rpc_meta.log_messages.clone().into();
            opt.unwrap_or_default()
        },
    };

    debug!(
        "converted rpc transaction at slot {}: {} instruction(s), {} inner group(s)",
        tx.slot,
        tx.instructions.len(),
        meta.inner_instructions.len()
    );
    Ok((tx, meta))
}

// ============================================================================
// Internal conversion functions
// ============================================================================

fn decode_transaction(encoded: &EncodedTransaction) -> ParseResult<VersionedTransaction> {
    match encoded {
        EncodedTransaction::Binary(data, _encoding) => {
            let bytes = general_purpose::STANDARD
                .decode(data)
                .map_err(|e| ParseError::ConversionError(format!("Failed to decode base64: {}", e)))?;
            bincode::deserialize(&bytes).map_err(|e| {
                ParseError::ConversionError(format!("Failed to deserialize transaction: {}", e))
            })
        }
        EncodedTransaction::Json(_) => Err(ParseError::ConversionError(
            "JSON encoded transactions not supported".to_string(),
        )),
        _ => Err(ParseError::ConversionError("Unsupported transaction encoding".to_string())),
    }
}

fn convert_inner_instructions(
    inner: &OptionSerializer<Vec<solana_transaction_status::UiInnerInstructions>>,
) -> ParseResult<Vec<InnerInstructions>> {
    let groups: Option<Vec<_>> = inner.clone().into();
    let mut out = Vec::new();
    for group in groups.unwrap_or_default() {
        let mut instructions = Vec::with_capacity(group.instructions.len());
        for ix in &group.instructions {
            // base64 编码请求下 inner 指令总是 compiled 形式
            if let UiInstruction::Compiled(compiled) = ix {
                let data = bs58::decode(&compiled.data).into_vec().map_err(|e| {
                    ParseError::ConversionError(format!("Failed to decode instruction data: {}", e))
                })?;
                instructions.push(Instruction::new(compiled.program_id_index, compiled.accounts.clone(), data));
            }
        }
        out.push(InnerInstructions { index: group.index, instructions });
    }
    Ok(out)
}

fn convert_token_balances(
    balances: &OptionSerializer<Vec<UiTransactionTokenBalance>>,
) -> ParseResult<Vec<TokenBalance>> {
    let balances: Option<Vec<UiTransactionTokenBalance>> = balances.clone().into();
    balances
        .unwrap_or_default()
        .iter()
        .map(|b| {
            Ok(TokenBalance {
                account_index: b.account_index,
                mint: parse_pubkey(&b.mint)?,
                decimals: b.ui_token_amount.decimals,
                amount: parse_amount(&b.ui_token_amount.amount)?,
            })
        })
        .collect()
}

fn parse_pubkey(s: &str) -> ParseResult<Pubkey> {
    Pubkey::from_str(s).map_err(|e| ParseError::ConversionError(format!("invalid pubkey {}: {}", s, e)))
}

fn parse_pubkeys(keys: &[String]) -> ParseResult<Vec<Pubkey>> {
    keys.iter().map(|k| parse_pubkey(k)).collect()
}

fn parse_amount(s: &str) -> ParseResult<u64> {
    s.parse::<u64>()
        .map_err(|e| ParseError::ConversionError(format!("invalid token amount {}: {}", s, e)))
}
