//! 池子账户填充模块 - 按协议拆分
//!
//! 池子快照不来自事件载荷，而是从匹配到的池子发现指令中按固定账户位置读取。
//! 位置是各协议、各指令版本的常量；账户不足时返回 None（视为指令格式不符）。

pub mod meteora;
pub mod pumpfun;
pub mod pumpswap;
pub mod raydium;

use solana_sdk::pubkey::Pubkey;

use crate::accounts::AccountKeys;
use crate::core::events::PoolSnapshot;
use crate::core::transaction::Instruction;
use crate::instr::registry::Protocol;

/// 账户获取辅助函数类型（按指令内账户位置取值，越界返回 None）
pub type AccountGetter<'a> = dyn Fn(usize) -> Option<Pubkey> + 'a;

/// 从池子发现指令填充快照（调用方已用 `is_pool_instruction` 过滤）
pub fn fill_pool(protocol: Protocol, ix: &Instruction, keys: &AccountKeys) -> Option<PoolSnapshot> {
    let get = |position: usize| keys.account(ix, position);
    match protocol {
        Protocol::PumpFun => pumpfun::fill_pool(&get).map(PoolSnapshot::PumpFun),
        Protocol::PumpSwap => pumpswap::fill_pool(&get).map(PoolSnapshot::PumpSwap),
        Protocol::RaydiumLaunchpad => raydium::fill_launchpad_pool(&get).map(PoolSnapshot::RaydiumLaunchpad),
        Protocol::MeteoraDbc => meteora::fill_dbc_pool(&get).map(PoolSnapshot::MeteoraDbc),
        _ => None,
    }
}
