use std::fmt;
use std::time::Duration;
use tonic::codec::CompressionEncoding;
use tonic::transport::Endpoint;

use crate::client::StubConfig;
use crate::error::{GrpcError, GrpcResult};

/// Channel option names understood by [`ChannelOptions`].
///
/// The names follow the gRPC core channel-argument convention so option lists
/// can be shared with clients written against other gRPC runtimes.
pub mod names {
  pub const KEEPALIVE_TIME_MS: &str = "grpc.keepalive_time_ms";
  pub const KEEPALIVE_TIMEOUT_MS: &str = "grpc.keepalive_timeout_ms";
  pub const KEEPALIVE_PERMIT_WITHOUT_CALLS: &str = "grpc.keepalive_permit_without_calls";
  pub const MAX_PINGS_WITHOUT_DATA: &str = "grpc.http2.max_pings_without_data";
  pub const MIN_TIME_BETWEEN_PINGS_MS: &str = "grpc.http2.min_time_between_pings_ms";
  pub const MIN_PING_INTERVAL_WITHOUT_DATA_MS: &str =
    "grpc.http2.min_ping_interval_without_data_ms";
  pub const LOOKAHEAD_BYTES: &str = "grpc.http2.lookahead_bytes";
  pub const PRIMARY_USER_AGENT: &str = "grpc.primary_user_agent";
  pub const SSL_TARGET_NAME_OVERRIDE: &str = "grpc.ssl_target_name_override";
  pub const MAX_RECEIVE_MESSAGE_LENGTH: &str = "grpc.max_receive_message_length";
  pub const MAX_SEND_MESSAGE_LENGTH: &str = "grpc.max_send_message_length";
  pub const DEFAULT_COMPRESSION_ALGORITHM: &str = "grpc.default_compression_algorithm";
}

/// Value of a single channel option
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionValue {
  Int(i64),
  Bool(bool),
  Str(String),
}

impl fmt::Display for OptionValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OptionValue::Int(v) => write!(f, "{v}"),
      OptionValue::Bool(v) => write!(f, "{v}"),
      OptionValue::Str(v) => write!(f, "{v:?}"),
    }
  }
}

impl From<i64> for OptionValue {
  fn from(value: i64) -> Self {
    OptionValue::Int(value)
  }
}

impl From<i32> for OptionValue {
  fn from(value: i32) -> Self {
    OptionValue::Int(value.into())
  }
}

impl From<u32> for OptionValue {
  fn from(value: u32) -> Self {
    OptionValue::Int(value.into())
  }
}

impl From<bool> for OptionValue {
  fn from(value: bool) -> Self {
    OptionValue::Bool(value)
  }
}

impl From<&str> for OptionValue {
  fn from(value: &str) -> Self {
    OptionValue::Str(value.to_string())
  }
}

impl From<String> for OptionValue {
  fn from(value: String) -> Self {
    OptionValue::Str(value)
  }
}

/// Ordered list of channel options (name → value)
///
/// A caller-supplied list fully replaces the defaults; nothing is merged.
/// Lists collected from an iterator are kept verbatim, repeated names
/// included, and the last value of a name wins on [`ChannelOptions::resolve`].
/// The [`ChannelOptions::set`] builder replaces an existing value in place.
///
/// # Example
/// ```ignore
/// use grpc_client::ChannelOptions;
/// use std::time::Duration;
///
/// let options = ChannelOptions::empty()
///     .with_keepalive_time(Duration::from_secs(60))
///     .with("grpc.primary_user_agent", "my-tool/1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOptions {
  entries: Vec<(String, OptionValue)>,
}

impl Default for ChannelOptions {
  /// Keepalive tuning used for the GPCore API.
  ///
  /// `max_pings_without_data = 0` keeps its gRPC meaning: no cap.
  fn default() -> Self {
    Self::empty()
      .with(names::KEEPALIVE_TIME_MS, 30_000)
      .with(names::KEEPALIVE_TIMEOUT_MS, 5_000)
      .with(names::KEEPALIVE_PERMIT_WITHOUT_CALLS, true)
      .with(names::MAX_PINGS_WITHOUT_DATA, 0)
      .with(names::MIN_TIME_BETWEEN_PINGS_MS, 10_000)
      .with(names::MIN_PING_INTERVAL_WITHOUT_DATA_MS, 300_000)
  }
}

impl ChannelOptions {
  /// Create the default option set
  pub fn new() -> Self {
    Self::default()
  }

  /// Create an option set with no entries
  pub fn empty() -> Self {
    Self {
      entries: Vec::new(),
    }
  }

  /// Set an option, replacing an existing value of the same name
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
    let name = name.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(n, _)| *n == name) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((name, value)),
    }
  }

  /// Builder form of [`ChannelOptions::set`]
  pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
    self.set(name, value);
    self
  }

  /// Append an option verbatim, even if the name is already present
  pub fn push(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
    self.entries.push((name.into(), value.into()));
  }

  /// Remove every entry of an option, returning the effective value
  pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
    let mut removed = None;
    self.entries.retain(|(n, v)| {
      if n == name {
        removed = Some(v.clone());
        false
      } else {
        true
      }
    });
    removed
  }

  /// Effective value of an option (the last one supplied)
  pub fn get(&self, name: &str) -> Option<&OptionValue> {
    self
      .entries
      .iter()
      .rev()
      .find(|(n, _)| n == name)
      .map(|(_, v)| v)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
    self.entries.iter().map(|(n, v)| (n.as_str(), v))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Set the HTTP/2 keep-alive ping interval
  pub fn with_keepalive_time(self, interval: Duration) -> Self {
    self.with(names::KEEPALIVE_TIME_MS, millis(interval))
  }

  /// Set how long to wait for a keep-alive ping acknowledgement
  pub fn with_keepalive_timeout(self, timeout: Duration) -> Self {
    self.with(names::KEEPALIVE_TIMEOUT_MS, millis(timeout))
  }

  /// Disable HTTP/2 keep-alive
  ///
  /// # Example
  /// ```ignore
  /// let options = ChannelOptions::new().without_keepalive();
  /// ```
  pub fn without_keepalive(mut self) -> Self {
    self.remove(names::KEEPALIVE_TIME_MS);
    self.remove(names::KEEPALIVE_TIMEOUT_MS);
    self.remove(names::KEEPALIVE_PERMIT_WITHOUT_CALLS);
    self
  }

  /// Set both message size limits to the same value
  ///
  /// # Example
  /// ```ignore
  /// let options = ChannelOptions::new()
  ///     .with_max_message_size(16 * 1024 * 1024); // 16MB
  /// ```
  pub fn with_max_message_size(self, size: usize) -> Self {
    let size = i64::try_from(size).unwrap_or(-1);
    self
      .with(names::MAX_RECEIVE_MESSAGE_LENGTH, size)
      .with(names::MAX_SEND_MESSAGE_LENGTH, size)
  }

  pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
    self.with(names::PRIMARY_USER_AGENT, user_agent.into())
  }

  /// Validate every entry and convert the list into typed settings
  ///
  /// Values of the wrong type or range, and names outside the `grpc.`
  /// namespace, are rejected here before any channel exists. Other `grpc.*`
  /// names are kept in [`ResolvedOptions::unrecognized`].
  pub fn resolve(&self) -> GrpcResult<ResolvedOptions> {
    let mut resolved = ResolvedOptions::default();

    for (name, value) in &self.entries {
      match name.as_str() {
        names::KEEPALIVE_TIME_MS => {
          resolved.keepalive_time = Some(positive_millis(name, value)?);
        }
        names::KEEPALIVE_TIMEOUT_MS => {
          resolved.keepalive_timeout = Some(positive_millis(name, value)?);
        }
        names::KEEPALIVE_PERMIT_WITHOUT_CALLS => {
          resolved.keepalive_permit_without_calls = Some(flag(name, value)?);
        }
        names::MAX_PINGS_WITHOUT_DATA => {
          let count = int_in_range(name, value, 0, u32::MAX.into())?;
          resolved.max_pings_without_data = Some(count as u32);
        }
        names::MIN_TIME_BETWEEN_PINGS_MS => {
          resolved.min_time_between_pings = Some(non_negative_millis(name, value)?);
        }
        names::MIN_PING_INTERVAL_WITHOUT_DATA_MS => {
          resolved.min_ping_interval_without_data = Some(non_negative_millis(name, value)?);
        }
        names::LOOKAHEAD_BYTES => {
          let size = int_in_range(name, value, 1, u32::MAX.into())?;
          resolved.stream_window_size = Some(size as u32);
        }
        names::PRIMARY_USER_AGENT => {
          resolved.user_agent = Some(text(name, value)?);
        }
        names::SSL_TARGET_NAME_OVERRIDE => {
          resolved.tls_domain_override = Some(text(name, value)?);
        }
        names::MAX_RECEIVE_MESSAGE_LENGTH => {
          resolved.max_receive_message_length = Some(message_length(name, value)?);
        }
        names::MAX_SEND_MESSAGE_LENGTH => {
          resolved.max_send_message_length = Some(message_length(name, value)?);
        }
        names::DEFAULT_COMPRESSION_ALGORITHM => {
          resolved.compression = compression(name, value)?;
        }
        other if other.starts_with(GRPC_PREFIX) && other.len() > GRPC_PREFIX.len() => {
          resolved.unrecognized.retain(|(n, _)| n != other);
          resolved.unrecognized.push((name.clone(), value.clone()));
        }
        _ => return Err(GrpcError::UnsupportedOption(name.clone())),
      }
    }

    Ok(resolved)
  }
}

impl<K, V> FromIterator<(K, V)> for ChannelOptions
where
  K: Into<String>,
  V: Into<OptionValue>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut options = ChannelOptions::empty();
    options.extend(iter);
    options
  }
}

impl<K, V> Extend<(K, V)> for ChannelOptions
where
  K: Into<String>,
  V: Into<OptionValue>,
{
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (name, value) in iter {
      self.push(name, value);
    }
  }
}

impl IntoIterator for ChannelOptions {
  type Item = (String, OptionValue);
  type IntoIter = std::vec::IntoIter<(String, OptionValue)>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_iter()
  }
}

/// Typed view of a validated [`ChannelOptions`] list
///
/// `None` means the option was not supplied and the transport default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
  // HTTP/2 Keep-Alive
  pub keepalive_time: Option<Duration>,
  pub keepalive_timeout: Option<Duration>,
  pub keepalive_permit_without_calls: Option<bool>,

  // Ping policing (no hyper equivalent, retained for inspection)
  pub max_pings_without_data: Option<u32>,
  pub min_time_between_pings: Option<Duration>,
  pub min_ping_interval_without_data: Option<Duration>,

  // Flow control
  pub stream_window_size: Option<u32>,

  // Identity
  pub user_agent: Option<String>,
  pub tls_domain_override: Option<String>,

  // Per-stub settings
  pub max_receive_message_length: Option<usize>,
  pub max_send_message_length: Option<usize>,
  pub compression: Option<CompressionEncoding>,

  // gRPC channel arguments with no transport equivalent, last value per name
  pub unrecognized: Vec<(String, OptionValue)>,
}

impl ResolvedOptions {
  /// Apply the transport-level settings to a tonic Endpoint
  pub(crate) fn apply_to_endpoint(&self, mut endpoint: Endpoint) -> GrpcResult<Endpoint> {
    // HTTP/2 keep-alive
    if let Some(interval) = self.keepalive_time {
      endpoint = endpoint.http2_keep_alive_interval(interval);
    }
    if let Some(timeout) = self.keepalive_timeout {
      endpoint = endpoint.keep_alive_timeout(timeout);
    }
    if let Some(while_idle) = self.keepalive_permit_without_calls {
      endpoint = endpoint.keep_alive_while_idle(while_idle);
    }

    // Window sizes
    if let Some(size) = self.stream_window_size {
      endpoint = endpoint.initial_stream_window_size(size);
    }

    if let Some(user_agent) = &self.user_agent {
      endpoint = endpoint
        .user_agent(user_agent.clone())
        .map_err(|e| GrpcError::invalid_option(names::PRIMARY_USER_AGENT, e.to_string()))?;
    }

    // hyper's HTTP/2 client does not police ping rates; the values stay in the
    // configuration so callers can still inspect what they asked for
    if self.max_pings_without_data.is_some()
      || self.min_time_between_pings.is_some()
      || self.min_ping_interval_without_data.is_some()
    {
      tracing::debug!(
        target: "grpc_client",
        max_pings_without_data = ?self.max_pings_without_data,
        min_time_between_pings = ?self.min_time_between_pings,
        min_ping_interval_without_data = ?self.min_ping_interval_without_data,
        "Ping policing options have no transport equivalent"
      );
    }

    for (name, value) in &self.unrecognized {
      tracing::debug!(
        target: "grpc_client",
        option = %name,
        value = %value,
        "Channel option has no transport equivalent"
      );
    }

    Ok(endpoint)
  }

  /// Settings applied to every stub bound to the channel
  pub fn stub_config(&self) -> StubConfig {
    let defaults = StubConfig::default();
    StubConfig {
      max_decoding_message_size: self
        .max_receive_message_length
        .unwrap_or(defaults.max_decoding_message_size),
      max_encoding_message_size: self
        .max_send_message_length
        .unwrap_or(defaults.max_encoding_message_size),
      compression: self.compression,
    }
  }
}

const GRPC_PREFIX: &str = "grpc.";

fn millis(duration: Duration) -> i64 {
  i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

fn int(name: &str, value: &OptionValue) -> GrpcResult<i64> {
  match value {
    OptionValue::Int(v) => Ok(*v),
    other => Err(GrpcError::invalid_option(
      name,
      format!("expected an integer, got {other}"),
    )),
  }
}

fn int_in_range(name: &str, value: &OptionValue, min: i64, max: i64) -> GrpcResult<i64> {
  let v = int(name, value)?;
  if v < min || v > max {
    return Err(GrpcError::invalid_option(
      name,
      format!("{v} is outside {min}..={max}"),
    ));
  }
  Ok(v)
}

fn positive_millis(name: &str, value: &OptionValue) -> GrpcResult<Duration> {
  let ms = int_in_range(name, value, 1, i64::MAX)?;
  Ok(Duration::from_millis(ms as u64))
}

fn non_negative_millis(name: &str, value: &OptionValue) -> GrpcResult<Duration> {
  let ms = int_in_range(name, value, 0, i64::MAX)?;
  Ok(Duration::from_millis(ms as u64))
}

fn flag(name: &str, value: &OptionValue) -> GrpcResult<bool> {
  match value {
    OptionValue::Bool(v) => Ok(*v),
    OptionValue::Int(0) => Ok(false),
    OptionValue::Int(1) => Ok(true),
    other => Err(GrpcError::invalid_option(
      name,
      format!("expected a boolean or 0/1, got {other}"),
    )),
  }
}

fn text(name: &str, value: &OptionValue) -> GrpcResult<String> {
  match value {
    OptionValue::Str(v) if !v.is_empty() => Ok(v.clone()),
    OptionValue::Str(_) => Err(GrpcError::invalid_option(name, "must not be empty")),
    other => Err(GrpcError::invalid_option(
      name,
      format!("expected a string, got {other}"),
    )),
  }
}

// -1 means unlimited
fn message_length(name: &str, value: &OptionValue) -> GrpcResult<usize> {
  match int_in_range(name, value, -1, i64::MAX)? {
    -1 => Ok(usize::MAX),
    v => Ok(usize::try_from(v).unwrap_or(usize::MAX)),
  }
}

// 0 = identity, 1 = deflate, 2 = gzip
fn compression(name: &str, value: &OptionValue) -> GrpcResult<Option<CompressionEncoding>> {
  match int_in_range(name, value, 0, 2)? {
    0 => Ok(None),
    1 => Ok(Some(CompressionEncoding::Deflate)),
    _ => Ok(Some(CompressionEncoding::Gzip)),
  }
}
