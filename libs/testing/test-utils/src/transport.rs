use std::fmt;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tonic::body::Body;
use tonic::service::Routes;
use tower::Service;

/// In-process transport that dispatches requests straight to tonic servers
///
/// Clones share the request log, so a transport handed to a client can still
/// be inspected by the test afterwards.
#[derive(Clone)]
pub struct InMemoryTransport {
    routes: Routes,
    paths: Arc<Mutex<Vec<String>>>,
}

impl InMemoryTransport {
    pub fn new(routes: Routes) -> Self {
        Self {
            routes,
            paths: Arc::default(),
        }
    }

    /// Request paths seen so far, e.g. `/gpcore.api.cloud.v2.CloudService/ReadinessCheck`
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.paths.lock().unwrap().len()
    }
}

impl From<Routes> for InMemoryTransport {
    fn from(routes: Routes) -> Self {
        Self::new(routes)
    }
}

impl Service<http::Request<Body>> for InMemoryTransport {
    type Response = <Routes as Service<http::Request<Body>>>::Response;
    type Error = <Routes as Service<http::Request<Body>>>::Error;
    type Future = <Routes as Service<http::Request<Body>>>::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Service::<http::Request<Body>>::poll_ready(&mut self.routes, cx)
    }

    fn call(&mut self, request: http::Request<Body>) -> Self::Future {
        let path = request.uri().path().to_string();
        tracing::trace!(path = %path, "in-memory request");
        self.paths.lock().unwrap().push(path);
        self.routes.call(request)
    }
}

impl fmt::Debug for InMemoryTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTransport")
            .field("requests", &self.request_count())
            .finish()
    }
}
