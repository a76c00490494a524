//! 解析流程中的所有记录类型
//!
//! - 转账记录 [`TransferRecord`]（只由转账提取器构造）
//! - 各协议自记录事件（[`ProtocolEvent`]）
//! - 兑换腿 [`SwapLeg`]：协议标签 + 负载，是对账器唯一的输入
//! - 池子快照 [`PoolSnapshot`] 与最终输出 [`SwapInfo`]

use chrono::{DateTime, Utc};
use serde::Serialize;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::instr::registry::Protocol;

// ============================================================================
// 转账记录
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferKind {
    /// System program transfer
    Native,
    /// SPL Token transfer (opcode 3)
    Token,
    /// SPL Token / Token-2022 transferChecked (opcode 12)
    TokenChecked,
}

/// 单次资产移动
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub kind: TransferKind,
    pub source: Pubkey,
    pub destination: Pubkey,
    /// 批准这次转账的签名者（原生转账即 source）
    pub authority: Pubkey,
    /// None 表示无法确定资产
    pub mint: Option<Pubkey>,
    pub amount: u64,
    pub decimals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// user -> pool
    Input,
    /// pool -> user
    Output,
}

// ============================================================================
// 协议事件
// ============================================================================

/// PumpFun TradeEvent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PumpFunTradeEvent {
    pub mint: Pubkey,
    pub sol_amount: u64,
    pub token_amount: u64,
    pub is_buy: bool,
    pub user: Pubkey,
    pub timestamp: i64,
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub real_token_reserves: u64,
}

/// PumpFun CreateEvent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PumpFunCreateEvent {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub user: Pubkey,
}

/// PumpSwap BuyEvent / SellEvent（两者布局相同，方向来自 discriminator）
///
/// buy 时 `base_amount` = base_amount_out，`quote_amount` = quote_amount_in；
/// sell 时 `base_amount` = base_amount_in，`quote_amount` = quote_amount_out。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PumpAmmTradeEvent {
    pub is_buy: bool,
    pub timestamp: i64,
    pub base_amount: u64,
    /// buy: max_quote_amount_in, sell: min_quote_amount_out
    pub quote_amount_limit: u64,
    pub user_base_token_reserves: u64,
    pub user_quote_token_reserves: u64,
    pub pool_base_token_reserves: u64,
    pub pool_quote_token_reserves: u64,
    pub quote_amount: u64,
    pub lp_fee_basis_points: u64,
    pub lp_fee: u64,
    pub protocol_fee_basis_points: u64,
    pub protocol_fee: u64,
    pub quote_amount_with_lp_fee: u64,
    pub user_quote_amount: u64,
    pub pool: Pubkey,
    pub user: Pubkey,
    pub user_base_token_account: Pubkey,
    pub user_quote_token_account: Pubkey,
    pub protocol_fee_recipient: Pubkey,
    pub protocol_fee_recipient_token_account: Pubkey,
}

/// Raydium Launchpad TradeEvent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RaydiumLaunchpadTradeEvent {
    pub pool_state: Pubkey,
    pub total_base_sell: u64,
    pub virtual_base: u64,
    pub virtual_quote: u64,
    pub real_base_before: u64,
    pub real_quote_before: u64,
    pub real_base_after: u64,
    pub real_quote_after: u64,
    pub amount_in: u64,
    pub amount_out: u64,
    pub protocol_fee: u64,
    pub platform_fee: u64,
    pub share_fee: u64,
}

/// Meteora DBC EvtSwap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeteoraDbcSwapEvent {
    pub pool: Pubkey,
    pub config: Pubkey,
    pub trade_direction: u8,
    pub has_referral: bool,
    pub amount_in_param: u64,
    pub minimum_amount_out: u64,
    pub actual_input_amount: u64,
    pub output_amount: u64,
    pub next_sqrt_price: u128,
    pub trading_fee: u64,
    pub protocol_fee: u64,
    pub referral_fee: u64,
    pub amount_in: u64,
    pub current_timestamp: u64,
}

/// Jupiter SwapEvent（一跳路由）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JupiterSwapEvent {
    pub amm: Pubkey,
    pub input_mint: Pubkey,
    pub input_amount: u64,
    pub output_mint: Pubkey,
    pub output_amount: u64,
}

/// Moonshot buy/sell 入口指令参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoonshotTradeEvent {
    pub is_buy: bool,
    pub mint: Pubkey,
    pub token_amount: u64,
    pub collateral_amount: u64,
    pub fixed_side: u8,
    pub slippage_bps: u64,
}

/// 已解码的协议事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProtocolEvent {
    PumpFunTrade(PumpFunTradeEvent),
    PumpAmmTrade(PumpAmmTradeEvent),
    RaydiumLaunchpadTrade(RaydiumLaunchpadTradeEvent),
    MeteoraDbcSwap(MeteoraDbcSwapEvent),
    JupiterSwap(JupiterSwapEvent),
    MoonshotTrade(MoonshotTradeEvent),
}

// ============================================================================
// 兑换腿
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LegPayload {
    Transfer(TransferRecord),
    Directed(Direction, TransferRecord),
    Event(ProtocolEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapLeg {
    pub protocol: Protocol,
    pub payload: LegPayload,
}

impl SwapLeg {
    pub fn transfer(protocol: Protocol, record: TransferRecord) -> Self {
        Self { protocol, payload: LegPayload::Transfer(record) }
    }

    pub fn directed(protocol: Protocol, direction: Direction, record: TransferRecord) -> Self {
        Self { protocol, payload: LegPayload::Directed(direction, record) }
    }

    pub fn event(protocol: Protocol, event: ProtocolEvent) -> Self {
        Self { protocol, payload: LegPayload::Event(event) }
    }
}

// ============================================================================
// 池子快照
// ============================================================================

/// PumpFun bonding curve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PumpFunPool {
    pub global: Pubkey,
    pub fee_recipient: Pubkey,
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub creator_vault: Pubkey,
    pub event_authority: Pubkey,
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub real_token_reserves: u64,
}

/// PumpSwap pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PumpSwapPool {
    pub pool: Pubkey,
    pub global_config: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub pool_base_token_account: Pubkey,
    pub pool_quote_token_account: Pubkey,
    pub protocol_fee_recipient: Pubkey,
    pub protocol_fee_recipient_token_account: Pubkey,
    pub coin_creator_vault_ata: Pubkey,
    pub coin_creator_vault_authority: Pubkey,
    pub pool_base_token_reserves: u64,
    pub pool_quote_token_reserves: u64,
}

/// Raydium Launchpad pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RaydiumLaunchpadPool {
    pub authority: Pubkey,
    pub global_config: Pubkey,
    pub platform_config: Pubkey,
    pub pool_state: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub event_authority: Pubkey,
    pub virtual_base: u64,
    pub virtual_quote: u64,
    pub real_base: u64,
    pub real_quote: u64,
}

/// Meteora DBC pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeteoraDbcPool {
    pub pool_authority: Pubkey,
    pub config: Pubkey,
    pub pool: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub token_base_program: Pubkey,
    pub token_quote_program: Pubkey,
    pub referral_token_account: Pubkey,
    pub event_authority: Pubkey,
    pub sqrt_price: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PoolSnapshot {
    PumpFun(PumpFunPool),
    PumpSwap(PumpSwapPool),
    RaydiumLaunchpad(RaydiumLaunchpadPool),
    MeteoraDbc(MeteoraDbcPool),
}

// ============================================================================
// 最终输出
// ============================================================================

/// 一笔交易的归一化兑换结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapInfo {
    pub signers: Vec<Pubkey>,
    pub signatures: Vec<Signature>,
    /// 交易的主导协议
    pub swap_type: Protocol,
    pub pool_data: Option<PoolSnapshot>,
    pub token_in_mint: Pubkey,
    pub token_in_amount: u64,
    pub token_in_decimals: u8,
    pub token_out_mint: Pubkey,
    pub token_out_amount: u64,
    pub token_out_decimals: u8,
    pub timestamp: Option<DateTime<Utc>>,
    /// 涉及的 AMM，按出现顺序去重（未注册的程序用地址表示）
    pub amms: Vec<String>,
}
