use serde::Deserialize;

/// Execution block as returned by `eth_getBlockByNumber` with full transaction objects.
///
/// Quantities are kept in their `0x`-prefixed hex form; see [`crate::rewards`] for how
/// they are interpreted.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionBlock {
    pub number: String,
    pub hash: String,
    #[serde(default)]
    pub base_fee_per_gas: Option<String>,
    pub gas_used: String,
    #[serde(default)]
    pub miner: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    #[serde(default)]
    pub gas_price: Option<String>,
    #[serde(default)]
    pub max_fee_per_gas: Option<String>,
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<String>,
    pub gas: String,
}

impl Transaction {
    pub fn is_eip1559(&self) -> bool {
        self.max_priority_fee_per_gas.is_some()
    }
}
