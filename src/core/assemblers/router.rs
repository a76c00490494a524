//! 路由 / 交易机器人（BananaGun、Bloom、Maestro ...）与 OKX 复合路由
//!
//! 路由本身不移动资产：按 inner 指令中出现的底层协议切片，委托给该协议自己的组装器。
//! 每个协议族在一条路由指令内只贡献一次兑换腿（同族的所有片段一起处理）。

use std::ops::Range;

use log::debug;
use smallvec::SmallVec;

use super::Scope;
use crate::accounts::AccountKeys;
use crate::core::events::SwapLeg;
use crate::core::parser::Parser;
use crate::core::transaction::Instruction;
use crate::instr::registry::{self, Protocol, ProtocolSpec};

/// 通用路由委托
pub fn assemble(parser: &Parser<'_>, scope: Scope<'_>) -> Vec<SwapLeg> {
    let segments = segment_by_protocol(parser.account_keys(), scope.inner);

    let mut processed: SmallVec<[Protocol; 4]> = SmallVec::new();
    let mut legs = Vec::new();
    for (spec, _) in &segments {
        let family = spec.protocol.family();
        if processed.contains(&family) {
            continue;
        }
        processed.push(family);

        for (member, range) in segments.iter().filter(|(s, _)| s.protocol.family() == family) {
            let sub = Scope { index: scope.index, entry: None, inner: &scope.inner[range.clone()] };
            legs.extend(super::assemble(parser, *member, sub));
        }
    }
    debug!(
        "router instruction #{} delegated to {} protocol famil(ies)",
        scope.index,
        processed.len()
    );
    legs
}

/// OKX：先确认是三个兑换入口之一，再按通用路由委托
pub fn assemble_compound(parser: &Parser<'_>, spec: &ProtocolSpec, scope: Scope<'_>) -> Vec<SwapLeg> {
    let Some(entry) = scope.entry else { return Vec::new() };
    if !spec.matches_entry(&entry.data) {
        debug!("{} instruction #{} is not a swap entry", spec.protocol, scope.index);
        return Vec::new();
    }
    debug!("{} entry {}", spec.protocol, hex::encode(entry.data.get(..8).unwrap_or_default()));
    assemble(parser, scope)
}

/// 把 inner 指令切成连续片段：每个片段从一条已注册底层协议的指令开始，
/// 到下一条不同协议族的指令为止。
///
/// 第一条协议指令之前的指令被丢弃：路由在调用 AMM 之前的转账是收手续费、
/// 包装 SOL 或建 ATA，不属于任何一跳；把它们交给某个协议会被当成兑换腿重复计数。
fn segment_by_protocol(
    keys: &AccountKeys,
    inner: &[Instruction],
) -> Vec<(&'static ProtocolSpec, Range<usize>)> {
    let mut segments: Vec<(&'static ProtocolSpec, Range<usize>)> = Vec::new();
    for (i, ix) in inner.iter().enumerate() {
        let target = keys
            .program_id(ix)
            .and_then(registry::lookup)
            .filter(|spec| spec.is_delegate_target());

        let extends_current = match (target, segments.last()) {
            (Some(spec), Some((current, _))) => current.protocol.family() == spec.protocol.family(),
            (None, Some(_)) => true,
            (_, None) => false,
        };
        match target {
            Some(spec) if !extends_current => segments.push((spec, i..i + 1)),
            _ => {
                if let Some((_, range)) = segments.last_mut() {
                    range.end = i + 1;
                }
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::okx;
    use crate::core::events::LegPayload;
    use crate::core::test_utils::{token_transfer_data, TxBuilder};
    use crate::instr::program_ids::*;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn test_segment_by_protocol() {
        let user = Pubkey::new_unique();
        let mut b = TxBuilder::new(user);
        let top = b.top(BLOOM_PROGRAM_ID, &[user], vec![]);
        b.inner(top, SYSTEM_PROGRAM_ID, &[user], vec![]); // 0：丢弃
        b.inner(top, RAYDIUM_AMM_V4_PROGRAM_ID, &[user], vec![]); // 1
        b.inner(top, TOKEN_PROGRAM_ID, &[user], vec![]); // 2
        b.inner(top, RAYDIUM_CPMM_PROGRAM_ID, &[user], vec![]); // 3：同族，延续
        b.inner(top, ORCA_WHIRLPOOL_PROGRAM_ID, &[user], vec![]); // 4
        b.inner(top, TOKEN_PROGRAM_ID, &[user], vec![]); // 5
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let segments = segment_by_protocol(parser.account_keys(), parser.inner_instructions_of(top));
        let shape: Vec<(Protocol, Range<usize>)> = segments.into_iter().map(|(s, r)| (s.protocol, r)).collect();
        assert_eq!(shape, vec![(Protocol::Raydium, 1..4), (Protocol::Orca, 4..6)]);
    }

    #[test]
    fn test_router_delegates_once_per_family() {
        let user = Pubkey::new_unique();
        let user_in = Pubkey::new_unique();
        let user_out = Pubkey::new_unique();
        let pool_a = Pubkey::new_unique();
        let pool_b = Pubkey::new_unique();
        let pool_authority = Pubkey::new_unique();
        let (mint_in, mint_mid, mint_out) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());

        let mut b = TxBuilder::new(user);
        b.balance(pool_a, mint_in, 6);
        b.balance(pool_b, mint_mid, 6);
        b.balance(user_out, mint_out, 9);
        let top = b.top(BANANA_GUN_PROGRAM_ID, &[user], vec![]);
        // Raydium：两次转账 + 又一次 Raydium 调用
        b.inner(top, RAYDIUM_AMM_V4_PROGRAM_ID, &[pool_a], vec![9]);
        b.inner(top, TOKEN_PROGRAM_ID, &[user_in, pool_a, user], token_transfer_data(100));
        b.inner(top, RAYDIUM_AMM_V4_PROGRAM_ID, &[pool_a], vec![9]);
        b.inner(top, TOKEN_PROGRAM_ID, &[user_in, pool_a, user], token_transfer_data(50));
        // Orca
        b.inner(top, ORCA_WHIRLPOOL_PROGRAM_ID, &[pool_b], vec![9]);
        b.inner(top, TOKEN_PROGRAM_ID, &[pool_b, user_out, pool_authority], token_transfer_data(7));
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let legs = parser.detect_swap_legs();
        let tags: Vec<(Protocol, u64)> = legs
            .iter()
            .filter_map(|l| match &l.payload {
                LegPayload::Transfer(t) => Some((l.protocol, t.amount)),
                _ => None,
            })
            .collect();
        assert_eq!(tags, vec![(Protocol::Raydium, 100), (Protocol::Raydium, 50), (Protocol::Orca, 7)]);
    }

    #[test]
    fn test_okx_requires_swap_entry() {
        let user = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        for (entry, expected) in [(okx::discriminators::SWAP.to_vec(), 1usize), (vec![0u8; 8], 0)] {
            let mut b = TxBuilder::new(user);
            b.balance(pool, mint, 6);
            let top = b.top(OKX_DEX_ROUTER_PROGRAM_ID, &[user], entry);
            b.inner(top, METEORA_DLMM_PROGRAM_ID, &[pool], vec![1]);
            b.inner(top, TOKEN_PROGRAM_ID, &[user, pool, user], token_transfer_data(5));
            let (tx, meta) = b.build();
            let parser = Parser::parse(&tx, &meta).unwrap();
            assert_eq!(parser.detect_swap_legs().len(), expected);
        }
    }
}
