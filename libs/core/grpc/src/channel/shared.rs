use futures::future::BoxFuture;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use tonic::Status;
use tonic::body::Body;
use tonic::transport::Channel;
use tower::util::BoxCloneService;
use tower::{BoxError, Service, ServiceExt};

use crate::error::{GrpcError, GrpcResult};

type Transport = BoxCloneService<http::Request<Body>, http::Response<Body>, BoxError>;

/// A closable handle to one gRPC transport, shared by every stub bound to it
///
/// Cloning is cheap and every clone refers to the same transport. Closing any
/// clone closes them all: the transport is dropped and subsequent calls fail
/// with `Status::unavailable`.
///
/// ## Example
/// ```ignore
/// use grpc_client::{SharedChannel, create_channel_lazy};
///
/// let channel = SharedChannel::from(create_channel_lazy(addr, &credentials, &options)?);
/// let client = CloudServiceClient::new(channel.clone());
/// channel.close()?;
/// ```
#[derive(Clone)]
pub struct SharedChannel {
  inner: Arc<Mutex<Option<Transport>>>,
}

impl SharedChannel {
  /// Wrap any tower service that speaks HTTP/2 gRPC framing
  pub fn new<S>(transport: S) -> Self
  where
    S: Service<http::Request<Body>, Response = http::Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
  {
    let transport = BoxCloneService::new(transport.map_err(|e: S::Error| e.into()));
    Self {
      inner: Arc::new(Mutex::new(Some(transport))),
    }
  }

  pub fn is_closed(&self) -> bool {
    self
      .inner
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .is_none()
  }

  /// Release the transport
  ///
  /// In-flight calls keep their own handle and run to completion. Returns
  /// `GrpcError::AlreadyClosed` if the channel was closed before.
  pub fn close(&self) -> GrpcResult<()> {
    let transport = self
      .inner
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .take();

    match transport {
      Some(transport) => {
        drop(transport);
        tracing::debug!(target: "grpc_client", "Channel closed");
        Ok(())
      }
      None => Err(GrpcError::AlreadyClosed),
    }
  }

  /// Whether both handles refer to the same underlying transport
  pub fn same_channel(&self, other: &SharedChannel) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  fn transport(&self) -> Option<Transport> {
    self
      .inner
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

impl From<Channel> for SharedChannel {
  fn from(channel: Channel) -> Self {
    SharedChannel::new(channel)
  }
}

impl Service<http::Request<Body>> for SharedChannel {
  type Response = http::Response<Body>;
  type Error = BoxError;
  type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

  // Readiness is checked per call on a cloned transport
  fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    Poll::Ready(Ok(()))
  }

  fn call(&mut self, request: http::Request<Body>) -> Self::Future {
    match self.transport() {
      Some(transport) => Box::pin(transport.oneshot(request)),
      None => Box::pin(async {
        let status = Status::from(GrpcError::ChannelClosed);
        Err::<Self::Response, _>(Box::new(status) as BoxError)
      }),
    }
  }
}

impl fmt::Debug for SharedChannel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SharedChannel")
      .field("closed", &self.is_closed())
      .finish()
  }
}
