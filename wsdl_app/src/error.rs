use thiserror::Error;
use wsdl_lib::WsdlError;

pub type AppResult<T> = ::std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Wsdl(#[from] WsdlError),
    #[error("Failed to read config file: {0}")]
    Config(#[from] ini::Error),
    #[error("Invalid value in config file, {section}.{key} = {value}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}
