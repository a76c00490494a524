//! Centralized Program ID Constants
//!
//! Pubkey constants for every program the swap parser recognises.
//! Using Pubkey constants instead of string constants allows for direct
//! comparison without expensive string conversion operations.

use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

// ============================================================================
// 系统 / Token 程序
// ============================================================================

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const TOKEN_2022_PROGRAM_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

/// Wrapped SOL mint，同时作为原生 SOL 转账的资产标记
pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

pub const WSOL_DECIMALS: u8 = 9;

// ============================================================================
// Pump
// ============================================================================

/// PumpFun program ID as Pubkey constant
pub const PUMPFUN_PROGRAM_ID: Pubkey = pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");

/// PumpFun global 账户（buy/sell 指令的第 0 个账户）
pub const PUMPFUN_GLOBAL_ACCOUNT: Pubkey = pubkey!("4wTV1YmiEkRvAtNtsSGPtUrqRYQMe5SKy2uB4Jjaxnjf");

/// PumpSwap program ID as Pubkey constant
pub const PUMPSWAP_PROGRAM_ID: Pubkey = pubkey!("pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA");

// ============================================================================
// Raydium
// ============================================================================

/// Raydium AMM V4 program ID as Pubkey constant
pub const RAYDIUM_AMM_V4_PROGRAM_ID: Pubkey =
    pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");

/// Raydium AMM routing program
pub const RAYDIUM_ROUTING_PROGRAM_ID: Pubkey =
    pubkey!("routeUGWgWzqBWFcrCfv8tritsqukccJPu3q5GPP3xS");

/// Raydium CPMM program ID as Pubkey constant
pub const RAYDIUM_CPMM_PROGRAM_ID: Pubkey = pubkey!("CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C");

/// Raydium CLMM program ID as Pubkey constant
pub const RAYDIUM_CLMM_PROGRAM_ID: Pubkey = pubkey!("CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK");

/// 按 Raydium 直接转账方式处理的另一个程序
pub const RAYDIUM_COMPAT_PROGRAM_ID: Pubkey =
    pubkey!("AP51WLiiqTdbZfgyRMs35PsZpdmLuPDdHYmrB23pEtMU");

/// Raydium Launchpad (LaunchLab) program ID
pub const RAYDIUM_LAUNCHPAD_PROGRAM_ID: Pubkey =
    pubkey!("LanMV9sAd7wArD4vJFi2qDdfnVhFxYSUg6eADduJ3uj");

// ============================================================================
// Orca / Meteora
// ============================================================================

/// Orca Whirlpool program ID as Pubkey constant
pub const ORCA_WHIRLPOOL_PROGRAM_ID: Pubkey =
    pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

/// Meteora DLMM program ID as Pubkey constant
pub const METEORA_DLMM_PROGRAM_ID: Pubkey = pubkey!("LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo");

/// Meteora Pools program ID as Pubkey constant
pub const METEORA_POOLS_PROGRAM_ID: Pubkey =
    pubkey!("Eo7WjKq67rjJQSZxS6z3YkapzY3eMj6Xy8X5EQVn5UaB");

/// Meteora Dynamic Bonding Curve program ID
pub const METEORA_DBC_PROGRAM_ID: Pubkey = pubkey!("dbcij3LWUppWqq96dh6gJWwBifmcGfLSB5D4DuSMaqN");

// ============================================================================
// 聚合器 / 路由
// ============================================================================

/// Jupiter v6 aggregator
pub const JUPITER_PROGRAM_ID: Pubkey = pubkey!("JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4");

/// Jupiter DCA，仅用于确定签名者位置
pub const JUPITER_DCA_PROGRAM_ID: Pubkey = pubkey!("DCAK36VfExkPdAkYUQg6ewgxyinvcEyPLyHjRbmveKFw");

/// OKX DEX router
pub const OKX_DEX_ROUTER_PROGRAM_ID: Pubkey =
    pubkey!("6m2CDdhRgxpH4WjvdzxAYbGxwdGUz5MziiL5jek2kBma");

pub const MOONSHOT_PROGRAM_ID: Pubkey = pubkey!("MoonCVVNZFSYkqNXP6bxHLPL6QQJiMagDL3qcqUQTrG");

pub const AXIOM_PROGRAM_ID: Pubkey = pubkey!("Axiom3a2w1UbMt2SMgqSvRiuJFTPusDhwKamNgPTeNQ9");

pub const AXIOM_V2_PROGRAM_ID: Pubkey = pubkey!("AxiomQpD1TrYEHNYLts8h3ko1NHdtxfgNgHryj2hJJx4");

/// Photon 在路由内部按 PumpFun 入口处理
pub const PHOTON_PROGRAM_ID: Pubkey = pubkey!("BSfD6SHZigAfDWSjzD5Q41jw8LmKwtmjskPH9XW1mrRW");

// Trading bots
pub const BANANA_GUN_PROGRAM_ID: Pubkey = pubkey!("BANANAjs7FJiPQqJTGFzkZJndT9o7UmKiYYGaJz6frGu");
pub const MINTECH_PROGRAM_ID: Pubkey = pubkey!("minTcHYRLVPubRK8nt6sqe2ZpWrGDLQoNLipDJCGocY");
pub const BLOOM_PROGRAM_ID: Pubkey = pubkey!("b1oomGGqPKGD6errbyfbVMBuzSC8WtAAYo8MwNafWW1");
pub const MAESTRO_PROGRAM_ID: Pubkey = pubkey!("MaestroAAe9ge5HTc64VbBQZ6fP77pwvrhM8i1XWSAx");
pub const NOVA_PROGRAM_ID: Pubkey = pubkey!("NoVA1TmDUqksaj2hB1nayFkPysjJbFiU76dT4qPw2wm");
