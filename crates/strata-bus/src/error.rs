use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusError {
    #[error("Strata error: {0}")]
    Strata(#[from] strata_core::StrataError),

    #[error("Feed channel closed")]
    ChannelClosed,

    #[error("Feed channel full")]
    ChannelFull,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BusError>;
