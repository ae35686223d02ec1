#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RewardError {
    #[error("missing field \"{0}\"")]
    MissingField(&'static str),
    #[error("invalid hex quantity \"{value}\" for field \"{field}\"")]
    InvalidQuantity { field: &'static str, value: String },
    #[error("transaction {hash}: {source}")]
    Transaction {
        hash: String,
        #[source]
        source: Box<RewardError>,
    },
    #[error("block reward of {0} GWEI doesn't fit in 64 bits")]
    Overflow(String),
}
