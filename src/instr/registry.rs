//! 协议注册表
//!
//! 每个支持的协议一条只读记录：程序 ID、组装策略、自记录事件 discriminator、
//! 入口指令 discriminator 以及池子发现指令的账户数量要求。进程内只构建一次。

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use super::program_ids::*;
use super::{jupiter_inner, meteora_dbc_inner, moonshot, okx, pump_amm_inner, pump_inner, raydium_launchpad_inner};

/// 协议标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Protocol {
    PumpFun,
    #[serde(rename = "PumpAmm")]
    PumpSwap,
    Jupiter,
    Raydium,
    RaydiumLaunchpad,
    #[serde(rename = "OKX")]
    Okx,
    Orca,
    Meteora,
    MeteoraDbc,
    Axiom,
    Moonshot,
    Router,
    Unknown,
}

impl Protocol {
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::PumpFun => "PumpFun",
            Protocol::PumpSwap => "PumpAmm",
            Protocol::Jupiter => "Jupiter",
            Protocol::Raydium => "Raydium",
            Protocol::RaydiumLaunchpad => "RaydiumLaunchpad",
            Protocol::Okx => "OKX",
            Protocol::Orca => "Orca",
            Protocol::Meteora => "Meteora",
            Protocol::MeteoraDbc => "MeteoraDbc",
            Protocol::Axiom => "Axiom",
            Protocol::Moonshot => "Moonshot",
            Protocol::Router => "Router",
            Protocol::Unknown => "Unknown",
        }
    }

    /// 路由去重使用的协议族（DBC 与 Meteora 其它池子算同一族）
    pub fn family(&self) -> Protocol {
        match self {
            Protocol::MeteoraDbc => Protocol::Meteora,
            other => *other,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 组装策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// 直接读取 inner 转账（有自记录事件时一并输出事件腿）
    DirectTransfer,
    /// 只看 bonding curve 自记录事件
    BondingCurveEvent,
    /// 按 authority 区分输入/输出的双边转账 + 自记录事件
    TwoSided,
    /// 直接解码入口指令参数
    BondingCurveEntry,
    /// 聚合器路由事件
    Aggregator,
    /// 先校验入口 discriminator，再按通用路由分发
    CompoundRouter,
    Router,
}

/// 账户数量要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    AtLeast(usize),
    Exactly(usize),
}

impl Arity {
    #[inline]
    pub fn matches(&self, count: usize) -> bool {
        match *self {
            Arity::AtLeast(n) => count >= n,
            Arity::Exactly(n) => count == n,
        }
    }
}

/// 池子发现指令的结构要求
#[derive(Debug, Clone, Copy)]
pub struct PoolLayout {
    pub arity: Arity,
    /// 固定位置必须是某个已知账户
    pub guard: Option<(usize, Pubkey)>,
}

#[derive(Debug)]
pub struct ProtocolSpec {
    pub protocol: Protocol,
    pub program_ids: &'static [Pubkey],
    pub strategy: Strategy,
    /// 出现在顶层时独占整笔交易的解析结果
    pub exclusive: bool,
    /// 该协议的转账腿顺序与兑换方向相反
    pub reversed_legs: bool,
    /// 交易类自记录事件（16 字节 discriminator）
    pub event_discriminators: &'static [[u8; 16]],
    /// 入口指令 discriminator（8 字节），为空表示不校验
    pub entry_discriminators: &'static [[u8; 8]],
    pub pool_layout: Option<PoolLayout>,
}

impl ProtocolSpec {
    #[inline]
    pub fn owns(&self, program_id: &Pubkey) -> bool {
        self.program_ids.contains(program_id)
    }

    /// 入口指令是否命中已知 discriminator
    pub fn matches_entry(&self, data: &[u8]) -> bool {
        if self.entry_discriminators.is_empty() {
            return true;
        }
        match data.get(..8) {
            Some(head) => self.entry_discriminators.iter().any(|d| d.as_slice() == head),
            None => false,
        }
    }

    /// 能否作为路由内部的委托目标
    pub fn is_delegate_target(&self) -> bool {
        !matches!(self.strategy, Strategy::Router | Strategy::CompoundRouter)
    }
}

// ============================================================================
// 注册表
// ============================================================================

static PROTOCOLS: &[ProtocolSpec] = &[
    ProtocolSpec {
        protocol: Protocol::Jupiter,
        program_ids: &[JUPITER_PROGRAM_ID],
        strategy: Strategy::Aggregator,
        exclusive: true,
        reversed_legs: false,
        event_discriminators: &[jupiter_inner::discriminators::SWAP_EVENT],
        entry_discriminators: &[],
        pool_layout: None,
    },
    ProtocolSpec {
        protocol: Protocol::Moonshot,
        program_ids: &[MOONSHOT_PROGRAM_ID],
        strategy: Strategy::BondingCurveEntry,
        exclusive: true,
        reversed_legs: false,
        event_discriminators: &[],
        entry_discriminators: &[moonshot::discriminators::BUY, moonshot::discriminators::SELL],
        pool_layout: None,
    },
    ProtocolSpec {
        protocol: Protocol::Okx,
        program_ids: &[OKX_DEX_ROUTER_PROGRAM_ID],
        strategy: Strategy::CompoundRouter,
        exclusive: true,
        reversed_legs: false,
        event_discriminators: &[],
        entry_discriminators: &[
            okx::discriminators::SWAP,
            okx::discriminators::SWAP2,
            okx::discriminators::COMMISSION_SPL_SWAP2,
        ],
        pool_layout: None,
    },
    ProtocolSpec {
        protocol: Protocol::Axiom,
        program_ids: &[AXIOM_PROGRAM_ID, AXIOM_V2_PROGRAM_ID],
        strategy: Strategy::DirectTransfer,
        exclusive: true,
        reversed_legs: true,
        event_discriminators: &[],
        entry_discriminators: &[],
        pool_layout: None,
    },
    ProtocolSpec {
        protocol: Protocol::Meteora,
        program_ids: &[METEORA_DLMM_PROGRAM_ID, METEORA_POOLS_PROGRAM_ID],
        strategy: Strategy::DirectTransfer,
        exclusive: true,
        reversed_legs: false,
        event_discriminators: &[],
        entry_discriminators: &[],
        pool_layout: None,
    },
    ProtocolSpec {
        protocol: Protocol::MeteoraDbc,
        program_ids: &[METEORA_DBC_PROGRAM_ID],
        strategy: Strategy::DirectTransfer,
        exclusive: true,
        reversed_legs: false,
        event_discriminators: &[meteora_dbc_inner::discriminators::EVT_SWAP],
        entry_discriminators: &[],
        pool_layout: Some(PoolLayout { arity: Arity::Exactly(15), guard: None }),
    },
    ProtocolSpec {
        protocol: Protocol::PumpFun,
        program_ids: &[PUMPFUN_PROGRAM_ID, PHOTON_PROGRAM_ID],
        strategy: Strategy::BondingCurveEvent,
        exclusive: false,
        reversed_legs: false,
        event_discriminators: &[pump_inner::discriminators::TRADE_EVENT],
        entry_discriminators: &[],
        pool_layout: Some(PoolLayout {
            arity: Arity::AtLeast(14),
            guard: Some((0, PUMPFUN_GLOBAL_ACCOUNT)),
        }),
    },
    ProtocolSpec {
        protocol: Protocol::PumpSwap,
        program_ids: &[PUMPSWAP_PROGRAM_ID],
        strategy: Strategy::TwoSided,
        exclusive: false,
        reversed_legs: false,
        event_discriminators: &[
            pump_amm_inner::discriminators::BUY_EVENT,
            pump_amm_inner::discriminators::SELL_EVENT,
        ],
        entry_discriminators: &[],
        pool_layout: Some(PoolLayout { arity: Arity::AtLeast(20), guard: None }),
    },
    ProtocolSpec {
        protocol: Protocol::Raydium,
        program_ids: &[
            RAYDIUM_AMM_V4_PROGRAM_ID,
            RAYDIUM_ROUTING_PROGRAM_ID,
            RAYDIUM_CPMM_PROGRAM_ID,
            RAYDIUM_CLMM_PROGRAM_ID,
            RAYDIUM_COMPAT_PROGRAM_ID,
        ],
        strategy: Strategy::DirectTransfer,
        exclusive: false,
        reversed_legs: false,
        event_discriminators: &[],
        entry_discriminators: &[],
        pool_layout: None,
    },
    ProtocolSpec {
        protocol: Protocol::RaydiumLaunchpad,
        program_ids: &[RAYDIUM_LAUNCHPAD_PROGRAM_ID],
        strategy: Strategy::DirectTransfer,
        exclusive: false,
        reversed_legs: false,
        event_discriminators: &[raydium_launchpad_inner::discriminators::TRADE_EVENT],
        entry_discriminators: &[],
        pool_layout: Some(PoolLayout { arity: Arity::AtLeast(18), guard: None }),
    },
    ProtocolSpec {
        protocol: Protocol::Orca,
        program_ids: &[ORCA_WHIRLPOOL_PROGRAM_ID],
        strategy: Strategy::DirectTransfer,
        exclusive: false,
        reversed_legs: false,
        event_discriminators: &[],
        entry_discriminators: &[],
        pool_layout: None,
    },
    ProtocolSpec {
        protocol: Protocol::Router,
        program_ids: &[
            BANANA_GUN_PROGRAM_ID,
            MINTECH_PROGRAM_ID,
            BLOOM_PROGRAM_ID,
            NOVA_PROGRAM_ID,
            MAESTRO_PROGRAM_ID,
        ],
        strategy: Strategy::Router,
        exclusive: false,
        reversed_legs: false,
        event_discriminators: &[],
        entry_discriminators: &[],
        pool_layout: None,
    },
];

static BY_PROGRAM: Lazy<HashMap<Pubkey, &'static ProtocolSpec>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(32);
    for spec in PROTOCOLS {
        for id in spec.program_ids {
            map.insert(*id, spec);
        }
    }
    map
});

/// 按程序 ID 查找协议
#[inline]
pub fn lookup(program_id: &Pubkey) -> Option<&'static ProtocolSpec> {
    BY_PROGRAM.get(program_id).copied()
}

/// 按协议标签查找
pub fn spec_of(protocol: Protocol) -> Option<&'static ProtocolSpec> {
    PROTOCOLS.iter().find(|s| s.protocol == protocol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_program_id() {
        assert_eq!(lookup(&PUMPFUN_PROGRAM_ID).map(|s| s.protocol), Some(Protocol::PumpFun));
        assert_eq!(lookup(&PHOTON_PROGRAM_ID).map(|s| s.protocol), Some(Protocol::PumpFun));
        assert_eq!(lookup(&RAYDIUM_CLMM_PROGRAM_ID).map(|s| s.protocol), Some(Protocol::Raydium));
        assert_eq!(lookup(&AXIOM_V2_PROGRAM_ID).map(|s| s.protocol), Some(Protocol::Axiom));
        assert!(lookup(&SYSTEM_PROGRAM_ID).is_none());
        assert!(lookup(&JUPITER_DCA_PROGRAM_ID).is_none());
    }

    #[test]
    fn test_program_ids_are_unique() {
        let total: usize = PROTOCOLS.iter().map(|s| s.program_ids.len()).sum();
        assert_eq!(BY_PROGRAM.len(), total);
    }

    #[test]
    fn test_okx_entry_gate() {
        let okx = spec_of(Protocol::Okx).unwrap();
        let mut data = okx::discriminators::SWAP2.to_vec();
        data.extend_from_slice(&[0u8; 16]);
        assert!(okx.matches_entry(&data));
        assert!(!okx.matches_entry(&[1, 2, 3, 4, 5, 6, 7, 8, 9]));
        assert!(!okx.matches_entry(&okx::discriminators::SWAP[..4]));

        // 未声明入口 discriminator 的协议不做校验
        let raydium = spec_of(Protocol::Raydium).unwrap();
        assert!(raydium.matches_entry(&[]));
    }

    #[test]
    fn test_pool_layout_arity() {
        assert!(Arity::AtLeast(14).matches(16));
        assert!(!Arity::AtLeast(14).matches(13));
        assert!(Arity::Exactly(15).matches(15));
        assert!(!Arity::Exactly(15).matches(16));
    }

    #[test]
    fn test_protocol_names() {
        assert_eq!(Protocol::PumpSwap.to_string(), "PumpAmm");
        assert_eq!(serde_json::to_string(&Protocol::Okx).unwrap(), "\"OKX\"");
        assert_eq!(Protocol::MeteoraDbc.family(), Protocol::Meteora);
    }
}
