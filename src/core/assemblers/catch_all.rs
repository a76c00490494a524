//! 兜底组装器：顶层程序未注册
//!
//! 只有当 inner 指令调用了某个已注册协议时才尝试提取：基础转账按 authority
//! 定向并打上第一个出现的底层协议标签，同时保留识别到的自记录事件。

use super::{direction_of, self_event_leg, Scope};
use crate::core::events::SwapLeg;
use crate::core::parser::Parser;
use crate::instr::registry;
use crate::instr::transfer::extract_transfer;

pub fn assemble(parser: &Parser<'_>, scope: Scope<'_>) -> Vec<SwapLeg> {
    let keys = parser.account_keys();
    let tokens = parser.token_info();

    let Some(underlying) = scope
        .inner
        .iter()
        .filter_map(|ix| keys.program_id(ix).and_then(registry::lookup))
        .find(|spec| spec.is_delegate_target())
    else {
        return Vec::new();
    };

    let mut legs = Vec::new();
    for ix in scope.inner {
        match keys.program_id(ix).and_then(registry::lookup) {
            Some(spec) => legs.extend(self_event_leg(parser, spec, ix)),
            None => {
                if let Some(transfer) = extract_transfer(ix, keys, tokens) {
                    let direction = direction_of(parser, &transfer);
                    legs.push(SwapLeg::directed(underlying.protocol, direction, transfer));
                }
            }
        }
    }
    super::log_legs(underlying, &scope, &legs);
    legs
}

#[cfg(test)]
mod tests {
    use crate::core::error::ParseError;
    use crate::core::events::{Direction, LegPayload};
    use crate::core::parser::Parser;
    use crate::core::test_utils::{native_transfer_data, token_transfer_data, TxBuilder};
    use crate::instr::program_ids::*;
    use crate::instr::registry::Protocol;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn test_unknown_programs_produce_no_legs() {
        let user = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let mut b = TxBuilder::new(user);
        let top = b.top(Pubkey::new_unique(), &[user, other], vec![1, 2, 3]);
        b.inner(top, SYSTEM_PROGRAM_ID, &[user, other], native_transfer_data(10));
        b.inner(top, TOKEN_PROGRAM_ID, &[user, other, user], token_transfer_data(10));
        b.top(SYSTEM_PROGRAM_ID, &[user, other], native_transfer_data(5));
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let legs = parser.detect_swap_legs();
        assert!(legs.is_empty());
        assert!(matches!(parser.reconcile(&legs), Err(ParseError::NoSwapFound)));
    }

    #[test]
    fn test_gated_on_registered_inner_program() {
        let user = Pubkey::new_unique();
        let user_token = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let vault_authority = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let mut b = TxBuilder::new(user);
        b.balance(user_token, mint, 6);
        let top = b.top(Pubkey::new_unique(), &[user], vec![]);
        b.inner(top, SYSTEM_PROGRAM_ID, &[user, vault], native_transfer_data(1_000));
        b.inner(top, RAYDIUM_CPMM_PROGRAM_ID, &[vault], vec![1]);
        b.inner(top, TOKEN_PROGRAM_ID, &[vault, user_token, vault_authority], token_transfer_data(42));
        let (tx, meta) = b.build();
        let parser = Parser::parse(&tx, &meta).unwrap();

        let legs = parser.detect_swap_legs();
        let shape: Vec<(Protocol, Direction, u64)> = legs
            .iter()
            .filter_map(|l| match &l.payload {
                LegPayload::Directed(d, t) => Some((l.protocol, *d, t.amount)),
                _ => None,
            })
            .collect();
        assert_eq!(
            shape,
            vec![(Protocol::Raydium, Direction::Input, 1_000), (Protocol::Raydium, Direction::Output, 42)]
        );
    }
}
