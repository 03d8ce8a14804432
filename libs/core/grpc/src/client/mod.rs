use tonic::codec::CompressionEncoding;

/// Per-stub settings derived from the channel options
///
/// tonic applies message limits and compression on the generated client
/// rather than on the channel, so every stub bound to a channel receives the
/// same `StubConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubConfig {
    /// Maximum size for incoming messages
    pub max_decoding_message_size: usize,
    /// Maximum size for outgoing messages
    pub max_encoding_message_size: usize,
    /// Compression used for requests and accepted for responses
    pub compression: Option<CompressionEncoding>,
}

impl Default for StubConfig {
    /// tonic's own defaults: 4MB in, unlimited out, no compression
    fn default() -> Self {
        Self {
            max_decoding_message_size: 4 * 1024 * 1024,
            max_encoding_message_size: usize::MAX,
            compression: None,
        }
    }
}

impl StubConfig {
    /// Set both message size limits
    ///
    /// ## Example
    /// ```ignore
    /// let config = StubConfig::default().with_limits(
    ///     16 * 1024 * 1024,  // 16MB max incoming
    ///     16 * 1024 * 1024   // 16MB max outgoing
    /// );
    /// ```
    pub fn with_limits(mut self, max_decoding: usize, max_encoding: usize) -> Self {
        self.max_decoding_message_size = max_decoding;
        self.max_encoding_message_size = max_encoding;
        self
    }

    pub fn with_compression(mut self, encoding: CompressionEncoding) -> Self {
        self.compression = Some(encoding);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_tonic() {
        let config = StubConfig::default();
        assert_eq!(config.max_decoding_message_size, 4 * 1024 * 1024);
        assert_eq!(config.max_encoding_message_size, usize::MAX);
        assert!(config.compression.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = StubConfig::default()
            .with_limits(8 * 1024 * 1024, 8 * 1024 * 1024)
            .with_compression(CompressionEncoding::Zstd);
        assert_eq!(config.max_decoding_message_size, 8 * 1024 * 1024);
        assert_eq!(config.max_encoding_message_size, 8 * 1024 * 1024);
        assert_eq!(config.compression, Some(CompressionEncoding::Zstd));
    }
}
