use core_config::ConfigError;
use grpc_client::GrpcError;
use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

/// Errors raised while building a client from configuration
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grpc(#[from] GrpcError),
}
