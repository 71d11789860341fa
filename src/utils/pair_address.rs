//! Uniswap V2 pair address utilities.
//!
//! V2 factories deploy pairs with CREATE2, so the pair address for a token
//! pair is known without an RPC round trip.

use alloy::primitives::{keccak256, Address, B256};

/// Sort two tokens the way the factory does (lower address is token0).
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// Compute the Uniswap V2 pair address for two tokens.
///
/// The pair address is:
/// ```text
/// create2(factory, keccak256(abi.encodePacked(token0, token1)), init_code_hash)
/// ```
///
/// # Arguments
/// * `factory` - Factory contract address
/// * `token_a` - First token (any order)
/// * `token_b` - Second token (any order)
/// * `init_code_hash` - keccak256 of the pair contract creation code
pub fn compute_pair_address(
    factory: Address,
    token_a: Address,
    token_b: Address,
    init_code_hash: B256,
) -> Address {
    let (token0, token1) = sort_tokens(token_a, token_b);

    let mut packed = [0u8; 40];
    packed[..20].copy_from_slice(token0.as_slice());
    packed[20..].copy_from_slice(token1.as_slice());
    let salt = keccak256(packed);

    factory.create2(salt.0, init_code_hash.0)
}
