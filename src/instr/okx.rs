//! OKX DEX Router 入口识别
//!
//! 同一个程序 ID 下有三个兑换入口（swap / swap2 / commission_spl_swap2），
//! 由注册表的入口 discriminator 校验，命中任一入口后按通用路由方式分发。

/// OKX DEX router instruction discriminators (8 bytes)
pub mod discriminators {
    pub const SWAP: [u8; 8] = [248, 198, 158, 145, 225, 117, 135, 200];
    pub const SWAP2: [u8; 8] = [65, 75, 63, 76, 235, 91, 91, 136];
    pub const COMMISSION_SPL_SWAP2: [u8; 8] = [173, 131, 78, 38, 150, 165, 123, 15];
}
