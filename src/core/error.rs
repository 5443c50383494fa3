use thiserror::Error;

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Unit cannot be ordered: {0:?}")]
    UnorderableUnit(crate::core::types::UnitId),

    #[error("Squad has no members")]
    EmptySquad,

    #[error("Unknown squad: {0:?}")]
    UnknownSquad(crate::core::types::SquadId),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
