use crate::model::types::AtomId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("atom '{atom}' does not exist in the molecule")]
    UnknownAtom { atom: AtomId },

    #[error("cannot bond atom '{atom}' to itself")]
    SelfBond { atom: AtomId },

    #[error("invalid editor configuration: {details}")]
    InvalidConfig { details: String },
}

impl Error {
    pub fn unknown_atom(atom: AtomId) -> Self {
        Self::UnknownAtom { atom }
    }

    pub fn self_bond(atom: AtomId) -> Self {
        Self::SelfBond { atom }
    }

    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }
}
