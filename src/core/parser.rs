//! 交易解析器
//!
//! [`Parser::parse`] 一次性完成准备工作：解析全局账户列表、建立 inner 指令索引、
//! 构建 token 信息表、识别主导协议。之后的所有操作都只读。

use std::collections::HashMap;

use log::{debug, warn};
use solana_sdk::pubkey::Pubkey;

use super::account_fillers::{self, meteora, pumpfun, pumpswap, raydium};
use super::assemblers;
use super::error::{ParseError, ParseResult};
use super::events::{PoolSnapshot, ProtocolEvent, PumpFunCreateEvent, SwapInfo, SwapLeg};
use super::reconciler;
use super::transaction::{Instruction, TransactionData, TransactionMeta};
use crate::accounts::{AccountKeys, TokenInfoMap};
use crate::instr::program_ids::JUPITER_DCA_PROGRAM_ID;
use crate::instr::registry::{self, Protocol, ProtocolSpec};
use crate::instr::{decode_self_event, is_pool_instruction, match_self_event, pump_inner};

/// DCA 交易中真正的用户位于第 2 个账户
const DCA_SIGNER_POSITION: u8 = 2;

/// Inner instructions 索引：顶层指令位置 -> inner 指令
pub type InnerInstructionsIndex<'a> = HashMap<usize, &'a [Instruction]>;

pub struct Parser<'a> {
    tx: &'a TransactionData,
    meta: &'a TransactionMeta,
    keys: AccountKeys,
    inner: InnerInstructionsIndex<'a>,
    tokens: TokenInfoMap,
    swap_type: Protocol,
    signer: Pubkey,
}

impl<'a> Parser<'a> {
    pub fn parse(tx: &'a TransactionData, meta: &'a TransactionMeta) -> ParseResult<Self> {
        if tx.account_keys.is_empty() {
            return Err(ParseError::MissingField("account_keys".to_string()));
        }

        let keys = AccountKeys::resolve(
            &tx.account_keys,
            &meta.loaded_writable_addresses,
            &meta.loaded_readonly_addresses,
        );

        let mut inner: InnerInstructionsIndex<'a> = HashMap::with_capacity(meta.inner_instructions.len());
        for set in &meta.inner_instructions {
            inner.entry(set.index as usize).or_insert(set.instructions.as_slice());
        }

        let tokens = TokenInfoMap::build(
            &keys,
            meta,
            tx.instructions.iter().chain(meta.inner_instructions.iter().flat_map(|s| s.instructions.iter())),
        );

        let swap_type = detect_swap_type(&keys);

        let signer = if keys.contains(&JUPITER_DCA_PROGRAM_ID) {
            keys.get(DCA_SIGNER_POSITION).or_else(|| keys.get(0))
        } else {
            keys.get(0)
        }
        .copied()
        .ok_or_else(|| ParseError::MissingField("signer".to_string()))?;

        debug!(
            "parsed tx: {} accounts, {} instructions, swap type {}",
            keys.len(),
            tx.instructions.len(),
            swap_type
        );

        Ok(Self { tx, meta, keys, inner, tokens, swap_type, signer })
    }

    // ========================================================================
    // 访问器
    // ========================================================================

    pub fn transaction(&self) -> &'a TransactionData {
        self.tx
    }

    pub fn meta(&self) -> &'a TransactionMeta {
        self.meta
    }

    pub fn account_keys(&self) -> &AccountKeys {
        &self.keys
    }

    pub fn token_info(&self) -> &TokenInfoMap {
        &self.tokens
    }

    /// 主导协议（账户列表中最后出现的、带池子布局的协议）
    pub fn swap_type(&self) -> Protocol {
        self.swap_type
    }

    /// 主签名者
    pub fn signer(&self) -> Pubkey {
        self.signer
    }

    pub fn signers(&self) -> Vec<Pubkey> {
        vec![self.signer]
    }

    pub fn instructions(&self) -> &'a [Instruction] {
        &self.tx.instructions
    }

    /// 顶层指令 `index` 执行期间产生的 inner 指令；没有记录时为空
    pub fn inner_instructions_of(&self, index: usize) -> &'a [Instruction] {
        self.inner.get(&index).copied().unwrap_or(&[])
    }

    /// 执行顺序：每条顶层指令之后紧跟它的 inner 指令
    pub fn program_order(&self) -> impl Iterator<Item = &'a Instruction> + '_ {
        self.instructions()
            .iter()
            .enumerate()
            .flat_map(move |(i, ix)| std::iter::once(ix).chain(self.inner_instructions_of(i).iter()))
    }

    // ========================================================================
    // 主流程
    // ========================================================================

    /// 对所有顶层指令执行 分类 / 提取 / 解码 / 组装
    pub fn detect_swap_legs(&self) -> Vec<SwapLeg> {
        assemblers::detect_swap_legs(self)
    }

    pub fn reconcile(&self, legs: &[SwapLeg]) -> ParseResult<SwapInfo> {
        reconciler::reconcile(self, legs)
    }

    pub fn parse_swap(&self) -> ParseResult<SwapInfo> {
        let legs = self.detect_swap_legs();
        self.reconcile(&legs)
    }

    /// 只查找 PumpFun CreateEvent，与兑换识别无关
    pub fn detect_mint_creation(&self) -> ParseResult<PumpFunCreateEvent> {
        let spec = registry::spec_of(Protocol::PumpFun).ok_or(ParseError::NoCreationFound)?;
        for ix in self.program_order() {
            if !crate::instr::is_self_event(ix, &self.keys, spec, &pump_inner::discriminators::CREATE_EVENT) {
                continue;
            }
            match pump_inner::decode_create_event(&ix.data) {
                Ok(event) => return Ok(event),
                Err(e) => warn!("skipping create event: {}", e),
            }
        }
        Err(ParseError::NoCreationFound)
    }

    // ========================================================================
    // 池子快照
    // ========================================================================

    /// 主导协议的池子快照，并用交易内对应事件回填储备/价格
    pub fn pool_snapshot(&self) -> Option<PoolSnapshot> {
        let spec = registry::spec_of(self.swap_type)?;
        spec.pool_layout?;

        let inner = self.meta.inner_instructions.iter().flat_map(|s| s.instructions.iter());
        let mut pool = self
            .instructions()
            .iter()
            .chain(inner)
            .filter(|ix| is_pool_instruction(ix, &self.keys, spec))
            .find_map(|ix| account_fillers::fill_pool(spec.protocol, ix, &self.keys))?;

        let events = self.scan_self_events(spec);
        match &mut pool {
            PoolSnapshot::PumpFun(p) => {
                if let Some(e) = events.iter().rev().find_map(|e| match e {
                    ProtocolEvent::PumpFunTrade(e) => Some(e),
                    _ => None,
                }) {
                    pumpfun::backfill(p, e);
                }
            }
            PoolSnapshot::PumpSwap(p) => {
                if let Some(e) = events.iter().find_map(|e| match e {
                    ProtocolEvent::PumpAmmTrade(e) => Some(e),
                    _ => None,
                }) {
                    pumpswap::backfill(p, e);
                }
            }
            PoolSnapshot::RaydiumLaunchpad(p) => {
                if let Some(e) = events.iter().rev().find_map(|e| match e {
                    ProtocolEvent::RaydiumLaunchpadTrade(e) => Some(e),
                    _ => None,
                }) {
                    raydium::backfill(p, e);
                }
            }
            PoolSnapshot::MeteoraDbc(p) => {
                if let Some(e) = events.iter().find_map(|e| match e {
                    ProtocolEvent::MeteoraDbcSwap(e) => Some(e),
                    _ => None,
                }) {
                    meteora::backfill(p, e);
                }
            }
        }
        Some(pool)
    }

    /// 全交易范围内按执行顺序解码该协议的自记录事件
    fn scan_self_events(&self, spec: &ProtocolSpec) -> Vec<ProtocolEvent> {
        self.program_order()
            .filter_map(|ix| {
                let disc = match_self_event(ix, &self.keys, spec)?;
                decode_self_event(spec.protocol, &disc, &ix.data)
                    .map_err(|e| warn!("skipping {} event: {}", spec.protocol, e))
                    .ok()
            })
            .collect()
    }
}

/// 便捷入口
pub fn parse<'a>(tx: &'a TransactionData, meta: &'a TransactionMeta) -> ParseResult<Parser<'a>> {
    Parser::parse(tx, meta)
}

/// 主导协议：账户列表中出现的、带池子发现布局的协议，后出现者优先
fn detect_swap_type(keys: &AccountKeys) -> Protocol {
    keys.as_slice()
        .iter()
        .filter_map(registry::lookup)
        .filter(|spec| spec.pool_layout.is_some())
        .last()
        .map(|spec| spec.protocol)
        .unwrap_or(Protocol::Unknown)
}
