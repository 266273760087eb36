use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookstallError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("required input set was absent")]
    NullInput,

    #[error("ISBN {0} is not in stock")]
    NotInStock(i32),

    #[error("ISBN {0} is already in the catalog")]
    Duplicate(i32),

    #[error("not enough copies in stock for ISBN {0}")]
    OutOfStock(i32),

    #[error("{0} is not supported by this store configuration")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, BookstallError>;
