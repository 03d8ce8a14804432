use std::sync::Arc;
use tonic::Status;

use super::{CallContext, CallCredentials, CallMetadata};

/// Two call credentials applied in sequence
///
/// Metadata from `first` is produced before `second`; when both set the same
/// key, the value from `second` wins. Either side failing fails the call.
///
/// # Example
/// ```ignore
/// use grpc_client::credentials::{CompositeCallCredentials, StaticMetadataCredentials, TokenCredentials};
///
/// let token = TokenCredentials::new("token");
/// let tenant = StaticMetadataCredentials::api_key("x-tenant", "acme");
/// let composed = CompositeCallCredentials::new(token, tenant);
/// ```
#[derive(Clone, Debug)]
pub struct CompositeCallCredentials {
  first: Arc<dyn CallCredentials>,
  second: Arc<dyn CallCredentials>,
}

impl CompositeCallCredentials {
  pub fn new(first: impl CallCredentials + 'static, second: impl CallCredentials + 'static) -> Self {
    Self {
      first: Arc::new(first),
      second: Arc::new(second),
    }
  }
}

impl CallCredentials for CompositeCallCredentials {
  fn metadata(&self, context: &CallContext<'_>) -> Result<CallMetadata, Status> {
    let mut metadata = self.first.metadata(context)?;
    metadata.merge(self.second.metadata(context)?);
    Ok(metadata)
  }
}
