//! Shared test utilities for gRPC client testing
//!
//! This crate provides reusable test infrastructure for the SDK crates:
//! - `InMemoryTransport`: serves generated tonic servers without a socket
//! - `MetadataRecorder`: server-side interceptor capturing request metadata
//! - `assertions`: Custom assertion helpers for `tonic::Status` results
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{InMemoryTransport, MetadataRecorder};
//! use tonic::service::Routes;
//!
//! #[tokio::test]
//! async fn my_client_test() {
//!     let recorder = MetadataRecorder::new();
//!     let routes = Routes::new(AuthServiceServer::with_interceptor(MockAuth, recorder.clone()));
//!     let transport = InMemoryTransport::new(routes);
//!
//!     // bind a client to `transport`, make calls...
//!
//!     assert_eq!(recorder.values("authorization"), vec!["Bearer abc123"]);
//! }
//! ```

mod recorder;
mod transport;

pub use recorder::MetadataRecorder;
pub use transport::InMemoryTransport;

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;
    use tonic::{Code, Status};

    /// Assert that a call failed with the given status code
    pub fn assert_status_code<T: Debug>(result: Result<T, Status>, expected: Code, context: &str) -> Status {
        match result {
            Ok(value) => panic!("{}: expected {:?}, got Ok({:?})", context, expected, value),
            Err(status) => {
                assert_eq!(
                    status.code(),
                    expected,
                    "{}: expected {:?}, got {:?} ({})",
                    context,
                    expected,
                    status.code(),
                    status.message()
                );
                status
            }
        }
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
