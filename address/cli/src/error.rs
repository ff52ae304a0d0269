#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("{0}")]
    AddressError(#[from] fil_address::Error),
    #[error("invalid hex: {0}")]
    HexError(#[from] hex::FromHexError),
    #[error("failed to format output: {0}")]
    FormatError(#[from] std::fmt::Error),
    #[error("{0} is not a valid address")]
    InvalidAddress(String),
}
