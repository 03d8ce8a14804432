use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors raised locally while building credentials, options and channels.
///
/// Transport failures (connectivity loss, TLS handshake, authentication
/// rejection) are not represented here: they reach the caller untouched as a
/// `tonic::Status` from the stub call.
#[derive(Error, Debug)]
pub enum GrpcError {
  /// Endpoint string could not be turned into a URI
  #[error("Invalid endpoint '{endpoint}': {reason}")]
  InvalidEndpoint { endpoint: String, reason: String },

  /// Endpoint asked for a plaintext scheme on a secure channel
  #[error("Endpoint '{0}' is not secure; only TLS endpoints are supported")]
  InsecureEndpoint(String),

  /// Option name is outside the `grpc.` channel-argument namespace
  #[error("Unsupported channel option '{0}'")]
  UnsupportedOption(String),

  /// Option value has the wrong type or is out of range
  #[error("Invalid value for channel option '{name}': {reason}")]
  InvalidOption { name: String, reason: String },

  /// TLS material was rejected by the transport
  #[error("Invalid TLS configuration: {0}")]
  TlsConfig(tonic::transport::Error),

  /// A lazy channel was requested outside a tokio runtime
  #[error("No tokio runtime available to drive the channel")]
  NoRuntime,

  /// Eager connection failed
  #[error("Connection failed: {0}")]
  ConnectionFailed(tonic::transport::Error),

  /// A stub was used after its channel was closed
  #[error("Channel closed")]
  ChannelClosed,

  /// `close()` was called on a channel that is already closed
  #[error("Channel already closed")]
  AlreadyClosed,
}

impl GrpcError {
  pub(crate) fn invalid_option(name: &str, reason: impl Into<String>) -> Self {
    GrpcError::InvalidOption {
      name: name.to_string(),
      reason: reason.into(),
    }
  }
}

// Implement conversion to tonic::Status so closed-channel failures surface
// through the stub like any other RPC error
impl From<GrpcError> for tonic::Status {
  fn from(err: GrpcError) -> Self {
    match err {
      GrpcError::InvalidEndpoint { .. }
      | GrpcError::InsecureEndpoint(_)
      | GrpcError::UnsupportedOption(_)
      | GrpcError::InvalidOption { .. }
      | GrpcError::TlsConfig(_) => tonic::Status::invalid_argument(err.to_string()),
      GrpcError::ConnectionFailed(_) | GrpcError::ChannelClosed => {
        tonic::Status::unavailable(err.to_string())
      }
      GrpcError::NoRuntime | GrpcError::AlreadyClosed => {
        tonic::Status::failed_precondition(err.to_string())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_closed_channel_maps_to_unavailable() {
    let status = tonic::Status::from(GrpcError::ChannelClosed);
    assert_eq!(status.code(), tonic::Code::Unavailable);
    assert_eq!(status.message(), "Channel closed");
  }

  #[test]
  fn test_double_close_maps_to_failed_precondition() {
    let status = tonic::Status::from(GrpcError::AlreadyClosed);
    assert_eq!(status.code(), tonic::Code::FailedPrecondition);
  }

  #[test]
  fn test_no_runtime_maps_to_failed_precondition() {
    let status = tonic::Status::from(GrpcError::NoRuntime);
    assert_eq!(status.code(), tonic::Code::FailedPrecondition);
  }

  #[test]
  fn test_option_errors_map_to_invalid_argument() {
    let status = tonic::Status::from(GrpcError::UnsupportedOption("grpc.nope".into()));
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert!(status.message().contains("grpc.nope"));

    let status = tonic::Status::from(GrpcError::invalid_option("grpc.keepalive_time_ms", "must be positive"));
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert!(status.message().contains("must be positive"));
  }
}
