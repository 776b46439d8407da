use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("document nesting exceeds {max_depth} levels")]
    TooDeep { max_depth: usize },
}
