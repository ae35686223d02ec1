//! Block reward computation from execution-layer fee fields.
//!
//! All arithmetic happens on arbitrary-precision integers: `base_fee * gas_used` alone
//! routinely exceeds 64 bits before the conversion to GWEI.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::clients::execution::types::{ExecutionBlock, Transaction};

pub use self::error::RewardError;

mod error;

pub const WEI_PER_GWEI: u64 = 1_000_000_000;

/// Parses a `0x`-prefixed big-endian hex quantity of arbitrary width.
pub fn parse_quantity(field: &'static str, value: &str) -> Result<BigInt, RewardError> {
    let invalid = || RewardError::InvalidQuantity {
        field,
        value: value.to_string(),
    };
    let digits = value.strip_prefix("0x").ok_or_else(invalid)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    BigUint::parse_bytes(digits.as_bytes(), 16)
        .map(|quantity| BigInt::from_biguint(Sign::Plus, quantity))
        .ok_or_else(invalid)
}

fn required_quantity(field: &'static str, value: Option<&String>) -> Result<BigInt, RewardError> {
    match value {
        Some(value) => parse_quantity(field, value),
        None => Err(RewardError::MissingField(field)),
    }
}

/// Per-gas fee paid to the proposer. May be zero or negative for transactions whose
/// fee cap sits below the block's base fee.
fn priority_fee(tx: &Transaction, base_fee: &BigInt) -> Result<BigInt, RewardError> {
    if tx.is_eip1559() {
        let max_priority_fee = required_quantity(
            "maxPriorityFeePerGas",
            tx.max_priority_fee_per_gas.as_ref(),
        )?;
        let max_fee = required_quantity("maxFeePerGas", tx.max_fee_per_gas.as_ref())?;

        Ok(max_priority_fee.min(max_fee - base_fee))
    } else {
        let gas_price = required_quantity("gasPrice", tx.gas_price.as_ref())?;

        Ok(gas_price - base_fee)
    }
}

/// Computes the total block reward in GWEI: the base fee times gas used plus every
/// transaction's positive priority fee times its gas limit, truncated to whole GWEI.
pub fn calculate_block_reward(block: &ExecutionBlock) -> Result<u64, RewardError> {
    let base_fee = required_quantity("baseFeePerGas", block.base_fee_per_gas.as_ref())?;
    let gas_used = parse_quantity("gasUsed", &block.gas_used)?;

    let base_fee_reward = &base_fee * gas_used;

    let mut total_priority_fees = BigInt::zero();

    for tx in &block.transactions {
        let tx_error = |source| RewardError::Transaction {
            hash: tx.hash.clone(),
            source: Box::new(source),
        };
        let priority_fee = priority_fee(tx, &base_fee).map_err(tx_error)?;

        if priority_fee > BigInt::zero() {
            let gas = parse_quantity("gas", &tx.gas).map_err(tx_error)?;

            total_priority_fees += priority_fee * gas;
        }
    }

    let total_reward = base_fee_reward + total_priority_fees;
    let gwei = total_reward / BigInt::from(WEI_PER_GWEI);

    gwei.to_u64()
        .ok_or_else(|| RewardError::Overflow(gwei.to_string()))
}
