use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("unknown sort: {0}")]
    UnknownSort(String),

    #[error("filter {filter} has no option matching {token:?}")]
    UnknownOption { filter: String, token: String },
}
