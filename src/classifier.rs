use serde::Serialize;

/// `0x` followed by the 20-byte address, hex encoded.
const MIN_CREDENTIALS_LEN: usize = 42;
const ADDRESS_HEX_LEN: usize = 40;

/// Withdrawal credential prefixes committing to an execution-layer address.
const ETH1_ADDRESS_WITHDRAWAL_PREFIX: u8 = 0x01;
const COMPOUNDING_WITHDRAWAL_PREFIX: u8 = 0x02;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MevStatus {
    Mev,
    Vanilla,
}

/// Extracts the withdrawal address from a validator's withdrawal credentials.
///
/// Returns `None` when the credentials are too short or don't commit to an execution
/// address (e.g. BLS `0x00` credentials).
pub fn withdrawal_address(credentials: &str) -> Option<String> {
    if credentials.len() < MIN_CREDENTIALS_LEN || !credentials.is_ascii() {
        return None;
    }

    let prefix = credentials
        .strip_prefix("0x")
        .and_then(|hex_credentials| hex_credentials.get(..2))
        .and_then(|prefix_byte| hex::decode(prefix_byte).ok())?;

    match prefix.first() {
        Some(&ETH1_ADDRESS_WITHDRAWAL_PREFIX) | Some(&COMPOUNDING_WITHDRAWAL_PREFIX) => {
            let address = &credentials[credentials.len() - ADDRESS_HEX_LEN..];

            Some(format!("0x{}", address.to_lowercase()))
        }
        _ => None,
    }
}

/// A block is considered MEV when its fee recipient differs from the proposer's
/// withdrawal address. An undeterminable withdrawal address counts as vanilla.
pub fn classify(fee_recipient: &str, withdrawal_credentials: &str) -> MevStatus {
    match withdrawal_address(withdrawal_credentials) {
        Some(address) if address != fee_recipient.to_lowercase() => MevStatus::Mev,
        _ => MevStatus::Vanilla,
    }
}
