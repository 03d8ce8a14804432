use std::sync::Arc;
use tonic::metadata::{Ascii, MetadataKey, MetadataValue};
use tonic::{GrpcMethod, Request, Status};

use crate::credentials::{CallContext, CallCredentials};

/// Interceptor that attaches call-credential metadata to every request
///
/// The call context is read from the `GrpcMethod` extension the generated
/// clients set on each request. Every value is inserted (never appended) and
/// marked sensitive, so a credential appears exactly once per call and is
/// never added to the HPACK table.
///
/// # Example
/// ```ignore
/// use grpc_client::interceptors::CallCredentialsInterceptor;
/// use grpc_client::TokenCredentials;
///
/// let interceptor = CallCredentialsInterceptor::new("api.gportal.com:443", Some(Arc::new(TokenCredentials::new("token"))));
/// let client = AuthServiceClient::with_interceptor(channel, interceptor);
/// ```
#[derive(Clone, Debug)]
pub struct CallCredentialsInterceptor {
    authority: Arc<str>,
    credentials: Option<Arc<dyn CallCredentials>>,
}

impl CallCredentialsInterceptor {
    pub fn new(authority: impl Into<String>, credentials: Option<Arc<dyn CallCredentials>>) -> Self {
        let authority: String = authority.into();
        Self {
            authority: Arc::from(authority),
            credentials,
        }
    }

    /// Interceptor that leaves requests untouched
    pub fn none(authority: impl Into<String>) -> Self {
        Self::new(authority, None)
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

impl tonic::service::Interceptor for CallCredentialsInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let Some(credentials) = &self.credentials else {
            return Ok(request);
        };

        let metadata = {
            let method = request.extensions().get::<GrpcMethod<'static>>();
            let context = CallContext::new(
                &self.authority,
                method.map(|m| m.service()),
                method.map(|m| m.method()),
            );
            credentials.metadata(&context)?
        };

        for (key, value) in metadata.iter() {
            let key = MetadataKey::<Ascii>::from_bytes(key.as_bytes())
                .map_err(|_| Status::internal("Invalid call credential metadata key"))?;
            let mut value = MetadataValue::try_from(value)
                .map_err(|_| Status::internal("Invalid call credential metadata value"))?;
            value.set_sensitive(true);
            request.metadata_mut().insert(key, value);
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CallMetadata, StaticMetadataCredentials, TokenCredentials};
    use std::sync::Mutex;
    use tonic::service::Interceptor;

    fn interceptor(credentials: impl CallCredentials + 'static) -> CallCredentialsInterceptor {
        CallCredentialsInterceptor::new("api.gportal.com:443", Some(Arc::new(credentials)))
    }

    #[derive(Debug, Default)]
    struct RecordingCredentials {
        seen: Mutex<Vec<(String, Option<String>, Option<String>)>>,
    }

    impl CallCredentials for RecordingCredentials {
        fn metadata(&self, context: &CallContext<'_>) -> Result<CallMetadata, Status> {
            self.seen.lock().unwrap().push((
                context.authority().to_string(),
                context.service().map(str::to_string),
                context.method().map(str::to_string),
            ));
            Ok(CallMetadata::new())
        }
    }

    #[test]
    fn test_bearer_token_attached() {
        let mut auth = interceptor(TokenCredentials::new("test-token"));
        let req = auth.call(Request::new(())).unwrap();
        let header = req.metadata().get("authorization").unwrap();
        assert_eq!(header, "Bearer test-token");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_existing_header_replaced_not_appended() {
        let mut auth = interceptor(TokenCredentials::new("abc123"));
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert("authorization", "Bearer stale".parse().unwrap());

        let req = auth.call(request).unwrap();
        let values: Vec<_> = req.metadata().get_all("authorization").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "Bearer abc123");
    }

    #[test]
    fn test_no_credentials_is_passthrough() {
        let mut none = CallCredentialsInterceptor::none("localhost:443");
        assert!(!none.has_credentials());
        let req = none.call(Request::new(())).unwrap();
        assert!(req.metadata().is_empty());
    }

    #[test]
    fn test_context_from_grpc_method() {
        let recording = Arc::new(RecordingCredentials::default());
        let mut auth = CallCredentialsInterceptor::new(
            "api.gportal.com:443",
            Some(recording.clone() as Arc<dyn CallCredentials>),
        );

        let mut request = Request::new(());
        request
            .extensions_mut()
            .insert(GrpcMethod::new("gpcore.api.auth.v1.AuthService", "GetUser"));
        auth.call(request).unwrap();

        let seen = recording.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[(
                "api.gportal.com:443".to_string(),
                Some("gpcore.api.auth.v1.AuthService".to_string()),
                Some("GetUser".to_string()),
            )]
        );
    }

    #[test]
    fn test_unencodable_value_fails_call() {
        let mut auth = interceptor(TokenCredentials::new("line\nbreak"));
        let status = auth.call(Request::new(())).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
        assert!(!status.message().contains("line"));
    }

    #[test]
    fn test_binary_key_rejected() {
        let mut auth = interceptor(StaticMetadataCredentials::api_key("x-token-bin", "abc"));
        let status = auth.call(Request::new(())).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
    }
}
