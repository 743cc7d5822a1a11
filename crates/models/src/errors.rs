use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{item_type} item is missing property `{property}`")]
    MissingProperty { item_type: &'static str, property: String },
    #[error("property `{property}` is not a {expected}")]
    TypeMismatch { property: String, expected: &'static str },
    #[error("expected a {expected} item, got {found}")]
    WrongItemType { expected: &'static str, found: &'static str },
    #[error("unknown item type: {0}")]
    UnknownItemType(String),
    #[error("database error: {0}")]
    Db(String),
}
