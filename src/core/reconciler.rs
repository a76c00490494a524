//! 兑换腿对账
//!
//! 把整笔交易的兑换腿合并成一条 [`SwapInfo`]，按优先级依次尝试：
//! 1. 聚合器路由事件：按 mint 累加输入/输出，抵消中间跳
//! 2. bonding curve 交易（PumpFun 事件 / Moonshot 入口）：取最后一条，方向来自 buy/sell 标志
//! 3. 定向转账：按 mint 求和，要求恰好一个输入 mint 和一个输出 mint
//! 4. 通用转账：第一个和最后一个不同的 mint 分别作为输入和输出

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::debug;
use smallvec::SmallVec;
use solana_sdk::pubkey::Pubkey;

use super::error::{ParseError, ParseResult};
use super::events::{Direction, JupiterSwapEvent, LegPayload, ProtocolEvent, SwapInfo, SwapLeg, TransferRecord};
use super::parser::Parser;
use crate::instr::program_ids::{WSOL_DECIMALS, WSOL_MINT};
use crate::instr::registry::{self, Protocol};

/// pump.fun 代币固定 6 位精度
const PUMPFUN_TOKEN_DECIMALS: u8 = 6;
/// moonshot 代币固定 9 位精度
const MOONSHOT_TOKEN_DECIMALS: u8 = 9;

/// (mint, amount, decimals)
type TokenAmount = (Pubkey, u64, u8);

struct Resolved {
    token_in: TokenAmount,
    token_out: TokenAmount,
    amms: Vec<String>,
    timestamp: Option<i64>,
}

/// 按首次出现顺序累加的 mint 数量表
#[derive(Default)]
struct MintTotals {
    entries: SmallVec<[TokenAmount; 4]>,
}

impl MintTotals {
    fn add(&mut self, mint: Pubkey, amount: u64, decimals: u8) {
        match self.entries.iter_mut().find(|(m, _, _)| *m == mint) {
            Some(entry) => entry.1 = entry.1.saturating_add(amount),
            None => self.entries.push((mint, amount, decimals)),
        }
    }

    fn contains(&self, mint: &Pubkey) -> bool {
        self.entries.iter().any(|(m, _, _)| m == mint)
    }

    fn remove(&mut self, mint: &Pubkey) {
        self.entries.retain(|(m, _, _)| m != mint);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

pub fn reconcile(parser: &Parser<'_>, legs: &[SwapLeg]) -> ParseResult<SwapInfo> {
    let route: Vec<&JupiterSwapEvent> = legs
        .iter()
        .filter_map(|leg| match &leg.payload {
            LegPayload::Event(ProtocolEvent::JupiterSwap(e)) => Some(e),
            _ => None,
        })
        .collect();

    let resolved = if !route.is_empty() {
        resolve_route(parser, &route)
    } else if let Some(leg) = legs.iter().rev().find(|leg| is_bonding_curve_trade(leg)) {
        resolve_bonding_curve(parser, leg)?
    } else if legs.iter().any(|leg| matches!(leg.payload, LegPayload::Directed(..))) {
        match resolve_two_sided(legs) {
            Ok(resolved) => resolved,
            Err(e) if !legs.iter().any(|leg| matches!(leg.payload, LegPayload::Transfer(_))) => {
                return Err(e)
            }
            Err(e) => {
                debug!("two-sided reconciliation failed ({}), falling back to transfers", e);
                resolve_transfers(legs)?
            }
        }
    } else {
        resolve_transfers(legs)?
    };

    Ok(finish(parser, resolved))
}

// ============================================================================
// 1. 聚合器路由
// ============================================================================

fn resolve_route(parser: &Parser<'_>, route: &[&JupiterSwapEvent]) -> Resolved {
    let decimals = |mint: &Pubkey| {
        parser.token_info().decimals_of(mint).unwrap_or_else(|| {
            debug!("no decimals recorded for route mint {}, using 0", mint);
            0
        })
    };

    let mut inputs = MintTotals::default();
    let mut outputs = MintTotals::default();
    for e in route {
        inputs.add(e.input_mint, e.input_amount, decimals(&e.input_mint));
        outputs.add(e.output_mint, e.output_amount, decimals(&e.output_mint));
    }

    // 同时出现在两侧的 mint 是中间跳
    let net_in = inputs.entries.iter().find(|(m, _, _)| !outputs.contains(m)).copied();
    let net_out = outputs.entries.iter().rev().find(|(m, _, _)| !inputs.contains(m)).copied();

    let (token_in, token_out) = match (net_in, net_out, route.first(), route.last()) {
        (Some(i), Some(o), _, _) => (i, o),
        // 环形路由：首跳输入 / 末跳输出
        (_, _, Some(first), Some(last)) => (
            (first.input_mint, first.input_amount, decimals(&first.input_mint)),
            (last.output_mint, last.output_amount, decimals(&last.output_mint)),
        ),
        _ => ((Pubkey::default(), 0, 0), (Pubkey::default(), 0, 0)),
    };

    let mut amms = Vec::new();
    for e in route {
        let name = registry::lookup(&e.amm)
            .map(|spec| spec.protocol.name().to_string())
            .unwrap_or_else(|| e.amm.to_string());
        if !amms.contains(&name) {
            amms.push(name);
        }
    }

    Resolved { token_in, token_out, amms, timestamp: None }
}

// ============================================================================
// 2. Bonding curve
// ============================================================================

fn is_bonding_curve_trade(leg: &SwapLeg) -> bool {
    matches!(
        leg.payload,
        LegPayload::Event(ProtocolEvent::PumpFunTrade(_)) | LegPayload::Event(ProtocolEvent::MoonshotTrade(_))
    )
}

fn resolve_bonding_curve(parser: &Parser<'_>, leg: &SwapLeg) -> ParseResult<Resolved> {
    let tokens = parser.token_info();
    let (is_buy, sol_amount, token, timestamp) = match &leg.payload {
        LegPayload::Event(ProtocolEvent::PumpFunTrade(e)) => {
            let decimals = tokens.decimals_of(&e.mint).unwrap_or(PUMPFUN_TOKEN_DECIMALS);
            (e.is_buy, e.sol_amount, (e.mint, e.token_amount, decimals), Some(e.timestamp))
        }
        LegPayload::Event(ProtocolEvent::MoonshotTrade(e)) => {
            let decimals = tokens.decimals_of(&e.mint).unwrap_or(MOONSHOT_TOKEN_DECIMALS);
            (e.is_buy, e.collateral_amount, (e.mint, e.token_amount, decimals), None)
        }
        _ => return Err(ParseError::NoSwapFound),
    };

    let sol = (WSOL_MINT, sol_amount, WSOL_DECIMALS);
    let (token_in, token_out) = if is_buy { (sol, token) } else { (token, sol) };
    Ok(Resolved { token_in, token_out, amms: vec![leg.protocol.name().to_string()], timestamp })
}

// ============================================================================
// 3. 定向转账
// ============================================================================

/// 输入侧存在多个 mint 时丢弃原生 SOL（手续费 / 租金转账）
fn drop_native_fee_input(inputs: &mut MintTotals) {
    if inputs.len() > 1 {
        inputs.remove(&WSOL_MINT);
    }
}

fn resolve_two_sided(legs: &[SwapLeg]) -> ParseResult<Resolved> {
    let mut inputs = MintTotals::default();
    let mut outputs = MintTotals::default();
    let mut protocols: SmallVec<[Protocol; 2]> = SmallVec::new();

    for leg in legs {
        let LegPayload::Directed(direction, transfer) = &leg.payload else { continue };
        let Some(mint) = transfer.mint else { continue };
        match direction {
            Direction::Input => inputs.add(mint, transfer.amount, transfer.decimals),
            Direction::Output => outputs.add(mint, transfer.amount, transfer.decimals),
        }
        if !protocols.contains(&leg.protocol) {
            protocols.push(leg.protocol);
        }
    }

    drop_native_fee_input(&mut inputs);

    if inputs.len() != 1 || outputs.len() != 1 {
        return Err(ParseError::AmbiguousSwap { inputs: inputs.len(), outputs: outputs.len() });
    }

    Ok(Resolved {
        token_in: inputs.entries[0],
        token_out: outputs.entries[0],
        amms: protocols.iter().map(|p| p.name().to_string()).collect(),
        timestamp: None,
    })
}

// ============================================================================
// 4. 通用转账
// ============================================================================

fn resolve_transfers(legs: &[SwapLeg]) -> ParseResult<Resolved> {
    let transfers: Vec<(Protocol, &TransferRecord, Pubkey)> = legs
        .iter()
        .filter_map(|leg| match &leg.payload {
            LegPayload::Transfer(t) => t.mint.map(|mint| (leg.protocol, t, mint)),
            _ => None,
        })
        .collect();

    let mut mints: SmallVec<[Pubkey; 4]> = SmallVec::new();
    for (_, _, mint) in &transfers {
        if !mints.contains(mint) {
            mints.push(*mint);
        }
    }
    let (in_mint, out_mint) = match (mints.first(), mints.last()) {
        (Some(first), Some(last)) if mints.len() >= 2 => (*first, *last),
        _ => return Err(ParseError::NoSwapFound),
    };

    // 同一 (mint, amount) 只计一次，避免重复/镜像转账被重复累加
    let mut seen: HashSet<(Pubkey, u64)> = HashSet::new();
    let mut totals = MintTotals::default();
    let mut amms: Vec<String> = Vec::new();
    for (protocol, t, mint) in &transfers {
        let name = protocol.name().to_string();
        if !amms.contains(&name) {
            amms.push(name);
        }
        if (*mint == in_mint || *mint == out_mint) && seen.insert((*mint, t.amount)) {
            totals.add(*mint, t.amount, t.decimals);
        }
    }

    let pick = |mint: Pubkey| {
        totals.entries.iter().find(|(m, _, _)| *m == mint).copied().unwrap_or((mint, 0, 0))
    };
    let (mut token_in, mut token_out) = (pick(in_mint), pick(out_mint));

    if transfers
        .iter()
        .any(|(p, _, _)| registry::spec_of(*p).is_some_and(|spec| spec.reversed_legs))
    {
        std::mem::swap(&mut token_in, &mut token_out);
    }

    Ok(Resolved { token_in, token_out, amms, timestamp: None })
}

// ============================================================================
// 输出
// ============================================================================

fn finish(parser: &Parser<'_>, r: Resolved) -> SwapInfo {
    let tx = parser.transaction();
    let timestamp = r
        .timestamp
        .or(tx.block_time)
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

    SwapInfo {
        signers: parser.signers(),
        signatures: tx.signatures.clone(),
        swap_type: parser.swap_type(),
        pool_data: parser.pool_snapshot(),
        token_in_mint: r.token_in.0,
        token_in_amount: r.token_in.1,
        token_in_decimals: r.token_in.2,
        token_out_mint: r.token_out.0,
        token_out_amount: r.token_out.1,
        token_out_decimals: r.token_out.2,
        timestamp,
        amms: r.amms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::PumpFunTradeEvent;
    use crate::core::test_utils::{native_transfer_data, token_transfer_data, transfer_checked_data, Bytes, TxBuilder};
    use crate::instr::program_ids::*;
    use crate::instr::{jupiter_inner, moonshot, pump_inner};

    #[test]
    fn test_two_sided_native_in_spl_out() {
        let user = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let pool_token = Pubkey::new_unique();
        let pool_authority = Pubkey::new_unique();
        let user_token = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let mut b = TxBuilder::new(user);
        b.balance(user_token, mint, 6);
        let top = b.top(PUMPSWAP_PROGRAM_ID, &[pool, user], vec![0; 8]);
        b.inner(top, SYSTEM_PROGRAM_ID, &[user, pool], native_transfer_data(1_000_000));
        b.inner(top, TOKEN_PROGRAM_ID, &[pool_token, user_token, pool_authority], token_transfer_data(5_000));
        b.block_time(1_700_000_000);
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let swap = parser.parse_swap().unwrap();
        assert_eq!(swap.token_in_mint, WSOL_MINT);
        assert_eq!(swap.token_in_amount, 1_000_000);
        assert_eq!(swap.token_in_decimals, 9);
        assert_eq!(swap.token_out_mint, mint);
        assert_eq!(swap.token_out_amount, 5_000);
        assert_eq!(swap.token_out_decimals, 6);
        assert_eq!(swap.swap_type, Protocol::PumpSwap);
        assert_eq!(swap.amms, vec!["PumpAmm".to_string()]);
        assert_eq!(swap.signers, vec![user]);
        assert_eq!(swap.timestamp.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn test_native_fee_input_dropped() {
        let user = Pubkey::new_unique();
        let user_usdc = Pubkey::new_unique();
        let user_token = Pubkey::new_unique();
        let pool_usdc = Pubkey::new_unique();
        let pool_token = Pubkey::new_unique();
        let fee_vault = Pubkey::new_unique();
        let pool_authority = Pubkey::new_unique();
        let (usdc, token) = (Pubkey::new_unique(), Pubkey::new_unique());

        let mut b = TxBuilder::new(user);
        b.balance(pool_usdc, usdc, 6);
        b.balance(user_token, token, 9);
        let top = b.top(PUMPSWAP_PROGRAM_ID, &[user], vec![0; 8]);
        b.inner(top, SYSTEM_PROGRAM_ID, &[user, fee_vault], native_transfer_data(2_039_280));
        b.inner(top, TOKEN_PROGRAM_ID, &[user_usdc, pool_usdc, user], token_transfer_data(25_000_000));
        b.inner(top, TOKEN_PROGRAM_ID, &[pool_token, user_token, pool_authority], token_transfer_data(777));
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let swap = parser.parse_swap().unwrap();
        assert_eq!((swap.token_in_mint, swap.token_in_amount), (usdc, 25_000_000));
        assert_eq!((swap.token_out_mint, swap.token_out_amount), (token, 777));
    }

    #[test]
    fn test_two_sided_ambiguous() {
        let user = Pubkey::new_unique();
        let pool_authority = Pubkey::new_unique();
        let (a_src, a_dst, b_src, b_dst) =
            (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let (mint_a, mint_b) = (Pubkey::new_unique(), Pubkey::new_unique());

        let mut b = TxBuilder::new(user);
        b.balance(a_dst, mint_a, 6);
        b.balance(b_dst, mint_b, 6);
        let top = b.top(PUMPSWAP_PROGRAM_ID, &[user], vec![0; 8]);
        b.inner(top, TOKEN_PROGRAM_ID, &[a_src, a_dst, pool_authority], token_transfer_data(1));
        b.inner(top, TOKEN_PROGRAM_ID, &[b_src, b_dst, pool_authority], token_transfer_data(2));
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        assert!(matches!(
            parser.parse_swap(),
            Err(ParseError::AmbiguousSwap { inputs: 0, outputs: 2 })
        ));
    }

    #[test]
    fn test_bonding_curve_uses_last_event() {
        let user = Pubkey::new_unique();
        let event_authority = Pubkey::new_unique();
        let mut b = TxBuilder::new(user);
        let buy = pump_inner::tests::sample_trade(true);
        let sell = PumpFunTradeEvent { is_buy: false, sol_amount: 900, token_amount: 1_234, ..buy.clone() };
        let top = b.top(PUMPFUN_PROGRAM_ID, &[user], vec![0; 8]);
        b.inner(top, PUMPFUN_PROGRAM_ID, &[event_authority], pump_inner::tests::trade_event_data(&buy));
        let top = b.top(PUMPFUN_PROGRAM_ID, &[user], vec![0; 8]);
        b.inner(top, PUMPFUN_PROGRAM_ID, &[event_authority], pump_inner::tests::trade_event_data(&sell));
        b.block_time(1);
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let swap = parser.parse_swap().unwrap();
        assert_eq!((swap.token_in_mint, swap.token_in_amount, swap.token_in_decimals), (buy.mint, 1_234, 6));
        assert_eq!((swap.token_out_mint, swap.token_out_amount, swap.token_out_decimals), (WSOL_MINT, 900, 9));
        assert_eq!(swap.timestamp.map(|t| t.timestamp()), Some(buy.timestamp));
        assert_eq!(swap.amms, vec!["PumpFun".to_string()]);
        // 池子指令需要 ≥14 个账户，这里没有
        assert_eq!(swap.pool_data, None);
    }

    #[test]
    fn test_jupiter_route_cancels_intermediate_mints() {
        let user = Pubkey::new_unique();
        let event_authority = Pubkey::new_unique();
        let unknown_amm = Pubkey::new_unique();
        let (a, m, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let hops = [
            JupiterSwapEvent { amm: RAYDIUM_CLMM_PROGRAM_ID, input_mint: a, input_amount: 100, output_mint: m, output_amount: 50 },
            JupiterSwapEvent { amm: unknown_amm, input_mint: m, input_amount: 50, output_mint: c, output_amount: 7 },
        ];

        let mut b = TxBuilder::new(user);
        b.balance(Pubkey::new_unique(), a, 6);
        b.balance(Pubkey::new_unique(), c, 8);
        let top = b.top(JUPITER_PROGRAM_ID, &[user], vec![0; 8]);
        for hop in &hops {
            b.inner(top, JUPITER_PROGRAM_ID, &[event_authority], jupiter_inner::tests::swap_event_data(hop));
        }
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let swap = parser.parse_swap().unwrap();
        assert_eq!((swap.token_in_mint, swap.token_in_amount, swap.token_in_decimals), (a, 100, 6));
        assert_eq!((swap.token_out_mint, swap.token_out_amount, swap.token_out_decimals), (c, 7, 8));
        assert_eq!(swap.amms, vec!["Raydium".to_string(), unknown_amm.to_string()]);
    }

    #[test]
    fn test_jupiter_circular_route_falls_back_to_first_and_last() {
        let user = Pubkey::new_unique();
        let event_authority = Pubkey::new_unique();
        let (a, m) = (Pubkey::new_unique(), Pubkey::new_unique());
        let hops = [
            JupiterSwapEvent { amm: ORCA_WHIRLPOOL_PROGRAM_ID, input_mint: a, input_amount: 100, output_mint: m, output_amount: 50 },
            JupiterSwapEvent { amm: ORCA_WHIRLPOOL_PROGRAM_ID, input_mint: m, input_amount: 50, output_mint: a, output_amount: 103 },
        ];
        let mut b = TxBuilder::new(user);
        let top = b.top(JUPITER_PROGRAM_ID, &[user], vec![0; 8]);
        for hop in &hops {
            b.inner(top, JUPITER_PROGRAM_ID, &[event_authority], jupiter_inner::tests::swap_event_data(hop));
        }
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let swap = parser.parse_swap().unwrap();
        assert_eq!((swap.token_in_mint, swap.token_in_amount), (a, 100));
        assert_eq!((swap.token_out_mint, swap.token_out_amount), (a, 103));
        // 没有余额记录的 mint 精度为 0
        assert_eq!((swap.token_in_decimals, swap.token_out_decimals), (0, 0));
        assert_eq!(swap.amms, vec!["Orca".to_string()]);
    }

    #[test]
    fn test_generic_transfers_dedup_and_axiom_inversion() {
        let user = Pubkey::new_unique();
        let (src_a, dst_a, src_b, dst_b) =
            (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let (mint_a, mint_b) = (Pubkey::new_unique(), Pubkey::new_unique());

        for (program, reversed) in [(RAYDIUM_AMM_V4_PROGRAM_ID, false), (AXIOM_PROGRAM_ID, true)] {
            let mut b = TxBuilder::new(user);
            b.balance(dst_a, mint_a, 6);
            b.balance(dst_b, mint_b, 9);
            let top = b.top(program, &[user], vec![0; 8]);
            b.inner(top, TOKEN_PROGRAM_ID, &[src_a, dst_a, user], token_transfer_data(10));
            b.inner(top, TOKEN_PROGRAM_ID, &[src_b, dst_b, user], token_transfer_data(20));
            // 镜像的重复转账只计一次
            b.inner(top, TOKEN_PROGRAM_ID, &[src_b, dst_b, user], token_transfer_data(20));
            b.inner(top, TOKEN_PROGRAM_ID, &[src_b, dst_b, user], token_transfer_data(5));
            let (tx, meta) = b.build();
            let parser = Parser::parse(&tx, &meta).unwrap();

            let swap = parser.parse_swap().unwrap();
            let a = (mint_a, 10, 6);
            let b = (mint_b, 25, 9);
            let (expected_in, expected_out) = if reversed { (b, a) } else { (a, b) };
            assert_eq!((swap.token_in_mint, swap.token_in_amount, swap.token_in_decimals), expected_in);
            assert_eq!((swap.token_out_mint, swap.token_out_amount, swap.token_out_decimals), expected_out);
        }
    }

    #[test]
    fn test_unlisted_destination_defaults_to_wsol() {
        let user = Pubkey::new_unique();
        let (src, dst, mint_dst) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mint = Pubkey::new_unique();
        let mut b = TxBuilder::new(user);
        b.balance(mint_dst, mint, 6);
        let top = b.top(ORCA_WHIRLPOOL_PROGRAM_ID, &[user], vec![0; 8]);
        // dst 没有余额记录，按 WSOL 补齐
        b.inner(top, TOKEN_PROGRAM_ID, &[src, dst, user], token_transfer_data(10));
        b.inner(top, TOKEN_PROGRAM_ID, &[src, mint, mint_dst, user], transfer_checked_data(3, 6));
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let swap = parser.parse_swap().unwrap();
        assert_eq!((swap.token_in_mint, swap.token_in_amount), (WSOL_MINT, 10));
        assert_eq!((swap.token_out_mint, swap.token_out_amount), (mint, 3));
    }

    #[test]
    fn test_moonshot_buy() {
        let user = Pubkey::new_unique();
        let accounts: Vec<Pubkey> = (0..8).map(|_| Pubkey::new_unique()).collect();
        let data = Bytes::with(&moonshot::discriminators::BUY).u64(5_000).u64(300).u8(0).u64(100).build();
        let mut b = TxBuilder::new(user);
        b.top(MOONSHOT_PROGRAM_ID, &accounts, data);
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let swap = parser.parse_swap().unwrap();
        assert_eq!((swap.token_in_mint, swap.token_in_amount, swap.token_in_decimals), (WSOL_MINT, 300, 9));
        assert_eq!((swap.token_out_mint, swap.token_out_amount, swap.token_out_decimals), (accounts[6], 5_000, 9));
        assert_eq!(swap.amms, vec!["Moonshot".to_string()]);
    }

    #[test]
    fn test_detect_swap_legs_is_idempotent() {
        let user = Pubkey::new_unique();
        let event_authority = Pubkey::new_unique();
        let mut b = TxBuilder::new(user);
        let top = b.top(BLOOM_PROGRAM_ID, &[user], vec![]);
        b.inner(top, PUMPFUN_PROGRAM_ID, &[user], vec![0; 8]);
        b.inner(top, PUMPFUN_PROGRAM_ID, &[event_authority], pump_inner::tests::trade_event_data(&pump_inner::tests::sample_trade(true)));
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let first = parser.detect_swap_legs();
        let second = parser.detect_swap_legs();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }
}
