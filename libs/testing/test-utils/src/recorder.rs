use std::sync::{Arc, Mutex};
use tonic::metadata::MetadataMap;
use tonic::{Request, Status};

/// Server-side interceptor that records the metadata of every request
///
/// # Example
/// ```ignore
/// let recorder = MetadataRecorder::new();
/// let server = CloudServiceServer::with_interceptor(MockCloud, recorder.clone());
/// // ... make calls ...
/// assert_eq!(recorder.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MetadataRecorder {
    requests: Arc<Mutex<Vec<MetadataMap>>>,
}

impl MetadataRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests recorded
    pub fn len(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata of the most recent request
    pub fn last(&self) -> Option<MetadataMap> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Every value of `key` on the most recent request
    pub fn values(&self, key: &str) -> Vec<String> {
        self.last()
            .map(|metadata| ascii_values(&metadata, key))
            .unwrap_or_default()
    }

    /// Every value of `key`, per recorded request
    pub fn values_per_request(&self, key: &str) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|metadata| ascii_values(metadata, key))
            .collect()
    }
}

impl tonic::service::Interceptor for MetadataRecorder {
    fn call(&mut self, request: Request<()>) -> Result<Request<()>, Status> {
        self.requests
            .lock()
            .unwrap()
            .push(request.metadata().clone());
        Ok(request)
    }
}

fn ascii_values(metadata: &MetadataMap, key: &str) -> Vec<String> {
    metadata
        .get_all(key)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::service::Interceptor;

    #[test]
    fn test_records_each_request() {
        let recorder = MetadataRecorder::new();
        let mut interceptor = recorder.clone();

        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert("authorization", "Bearer abc123".parse().unwrap());
        interceptor.call(request).unwrap();
        interceptor.call(Request::new(())).unwrap();

        assert_eq!(recorder.len(), 2);
        assert!(recorder.values("authorization").is_empty());
        assert_eq!(
            recorder.values_per_request("authorization"),
            vec![vec!["Bearer abc123".to_string()], vec![]]
        );
    }

    #[test]
    fn test_empty_recorder() {
        let recorder = MetadataRecorder::new();
        assert!(recorder.is_empty());
        assert!(recorder.last().is_none());
        assert!(recorder.values("authorization").is_empty());
    }
}
