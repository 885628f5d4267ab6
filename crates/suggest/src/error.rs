use thiserror::Error;

pub type Result<T> = std::result::Result<T, SuggestError>;

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Invalid suggest config: {0}")]
    InvalidConfig(String),
}
