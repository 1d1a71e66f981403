//! Runtime configuration: log level, output format and destination.

use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Environment variable holding the log level directive.
pub const LEVEL_VARIABLE: &str = "FECTO_LOG";

/// Environment variable holding the log format name.
pub const FORMAT_VARIABLE: &str = "FECTO_LOG_FORMAT";

/// Errors raised while reading or validating runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The log format name is not one of `full`, `compact` or `pretty`.
    #[error("unknown log format `{value}` (expected full, compact or pretty)")]
    InvalidFormat {
        /// The rejected name.
        value: String,
    },

    /// An environment variable is set but is not valid Unicode.
    #[error("environment variable `{name}` is not valid unicode")]
    NotUnicode {
        /// The variable's name.
        name: String,
    },

    /// Zero was given as the failure exit code.
    #[error("the failure exit code must be non-zero")]
    ZeroExitCode,
}

// =============================================================================
// LogFormat
// =============================================================================

/// How log records are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogFormat {
    /// One line per record, with span context.
    #[default]
    Full,
    /// A shorter single-line rendering.
    Compact,
    /// Multi-line, human-oriented output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ConfigError::InvalidFormat {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Full => "full",
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        };
        formatter.write_str(name)
    }
}

// =============================================================================
// LogBuffer
// =============================================================================

/// An in-memory log destination.
///
/// Clones share the same bytes, so a test can keep one handle and give the
/// other to a [`RuntimeConfig`].
///
/// # Examples
///
/// ```rust
/// use std::io::Write;
/// use fecto::runtime::LogBuffer;
/// use tracing_subscriber::fmt::MakeWriter;
///
/// let buffer = LogBuffer::new();
/// buffer.make_writer().write_all(b"hello").unwrap();
/// assert_eq!(buffer.contents(), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, decoded lossily as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Returns the written text split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

/// The writer handed out by [`LogBuffer`] for each record.
#[derive(Debug)]
pub struct LogBufferWriter {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for LogBufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogBufferWriter {
            bytes: Arc::clone(&self.bytes),
        }
    }
}

// =============================================================================
// LogTarget
// =============================================================================

/// Where log records are written.
#[derive(Debug, Clone, Default)]
pub enum LogTarget {
    /// The process's standard error.
    #[default]
    Stderr,
    /// The process's standard output.
    Stdout,
    /// An in-memory [`LogBuffer`].
    Buffer(LogBuffer),
}

// =============================================================================
// LogSink
// =============================================================================

/// One destination for log records, optionally with its own level and format.
///
/// A sink without overrides uses the level and format of the
/// [`RuntimeConfig`] it belongs to.
///
/// # Examples
///
/// ```rust
/// use fecto::runtime::{LogFormat, LogSink, LogTarget};
///
/// let sink = LogSink::new(LogTarget::Stdout)
///     .with_level("warning")
///     .with_format(LogFormat::Compact);
///
/// assert_eq!(sink.level(), Some("warning"));
/// assert_eq!(sink.format(), Some(LogFormat::Compact));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    target: LogTarget,
    level: Option<String>,
    format: Option<LogFormat>,
}

impl LogSink {
    /// Creates a sink writing to `target` with no overrides.
    #[must_use]
    pub const fn new(target: LogTarget) -> Self {
        Self {
            target,
            level: None,
            format: None,
        }
    }

    /// Overrides the level directive for this sink only.
    #[must_use]
    pub fn with_level<S>(mut self, level: S) -> Self
    where
        S: Into<String>,
    {
        self.level = Some(level.into());
        self
    }

    /// Overrides the output format for this sink only.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Returns the destination.
    #[must_use]
    pub const fn target(&self) -> &LogTarget {
        &self.target
    }

    /// Returns the level override, if any.
    #[must_use]
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    /// Returns the format override, if any.
    #[must_use]
    pub const fn format(&self) -> Option<LogFormat> {
        self.format
    }
}

impl From<LogTarget> for LogSink {
    fn from(target: LogTarget) -> Self {
        Self::new(target)
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Configuration for a [`Runtime`](super::Runtime).
///
/// The level is an `EnvFilter` directive such as `"debug"` or
/// `"fecto=trace,warn"`. A bare word must name a level; `warning` and
/// `critical` are accepted as aliases of `warn` and `error`.
///
/// # Examples
///
/// ```rust
/// use fecto::runtime::{LogBuffer, LogFormat, LogTarget, RuntimeConfig};
///
/// let config = RuntimeConfig::default()
///     .with_level("debug")
///     .with_format(LogFormat::Compact)
///     .with_target(LogTarget::Buffer(LogBuffer::new()));
///
/// assert_eq!(config.level(), "debug");
/// assert_eq!(config.sinks().len(), 1);
/// assert!(!config.ansi());
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    level: String,
    format: LogFormat,
    sinks: Vec<LogSink>,
    ansi: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            sinks: vec![LogSink::default()],
            ansi: true,
        }
    }
}

impl RuntimeConfig {
    /// Reads the configuration from `FECTO_LOG` and `FECTO_LOG_FORMAT`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is not valid Unicode or the
    /// format name is unknown.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                name: name.to_string(),
            }),
        })
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `lookup` is called with [`LEVEL_VARIABLE`] and [`FORMAT_VARIABLE`].
    ///
    /// # Errors
    ///
    /// Propagates lookup errors and rejects unknown format names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::runtime::{LogFormat, RuntimeConfig};
    ///
    /// let config = RuntimeConfig::from_lookup(|name| {
    ///     Ok(match name {
    ///         "FECTO_LOG" => Some("warn".to_string()),
    ///         "FECTO_LOG_FORMAT" => Some("Pretty".to_string()),
    ///         _ => None,
    ///     })
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.level(), "warn");
    /// assert_eq!(config.format(), LogFormat::Pretty);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup(LEVEL_VARIABLE)? {
            config = config.with_level(level);
        }
        if let Some(format) = lookup(FORMAT_VARIABLE)? {
            config = config.with_format(format.parse()?);
        }
        Ok(config)
    }

    /// Sets the default level directive, e.g. `"debug"` or `"fecto=trace,warn"`.
    #[must_use]
    pub fn with_level<S>(mut self, level: S) -> Self
    where
        S: Into<String>,
    {
        self.level = level.into();
        self
    }

    /// Sets the default output format.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Replaces every sink with a single one writing to `target`.
    #[must_use]
    pub fn with_target(self, target: LogTarget) -> Self {
        self.with_sinks([LogSink::new(target)])
    }

    /// Adds a sink next to the existing ones.
    #[must_use]
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: Into<LogSink>,
    {
        self.sinks.push(sink.into());
        self
    }

    /// Replaces every sink with `sinks`.
    #[must_use]
    pub fn with_sinks<I>(mut self, sinks: I) -> Self
    where
        I: IntoIterator<Item = LogSink>,
    {
        self.sinks = sinks.into_iter().collect();
        self
    }

    /// Enables or disables ANSI colors. Buffer targets never use colors.
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Returns the default level directive.
    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Returns the default output format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }

    /// Returns the configured sinks in order.
    #[must_use]
    pub fn sinks(&self) -> &[LogSink] {
        &self.sinks
    }

    /// Returns the level directive `sink` filters with.
    #[must_use]
    pub fn level_for<'a>(&'a self, sink: &'a LogSink) -> &'a str {
        sink.level().unwrap_or(&self.level)
    }

    /// Returns the format `sink` renders with.
    #[must_use]
    pub fn format_for(&self, sink: &LogSink) -> LogFormat {
        sink.format().unwrap_or(self.format)
    }

    /// Returns whether `sink` will emit ANSI colors.
    #[must_use]
    pub const fn ansi_for(&self, sink: &LogSink) -> bool {
        self.ansi && !matches!(sink.target, LogTarget::Buffer(_))
    }

    /// Returns whether any sink will emit ANSI colors.
    #[must_use]
    pub fn ansi(&self) -> bool {
        self.sinks.iter().any(|sink| self.ansi_for(sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("full", LogFormat::Full)]
    #[case("COMPACT", LogFormat::Compact)]
    #[case(" Pretty ", LogFormat::Pretty)]
    fn test_log_format_parses_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(input.parse::<LogFormat>(), Ok(expected));
    }

    #[rstest]
    fn test_log_format_rejects_unknown_name() {
        assert_eq!(
            "json".parse::<LogFormat>(),
            Err(ConfigError::InvalidFormat {
                value: "json".to_string()
            })
        );
    }

    #[rstest]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.level(), "info");
        assert_eq!(config.format(), LogFormat::Full);
        assert_eq!(config.sinks().len(), 1);
        assert!(matches!(config.sinks()[0].target(), LogTarget::Stderr));
        assert!(config.ansi());
    }

    #[rstest]
    fn test_sink_overrides_fall_back_to_config() {
        let config = RuntimeConfig::default()
            .with_level("debug")
            .with_format(LogFormat::Compact)
            .with_target(LogTarget::Stdout)
            .with_sink(
                LogSink::new(LogTarget::Stderr)
                    .with_level("error")
                    .with_format(LogFormat::Pretty),
            );

        let [plain, overridden] = config.sinks() else {
            panic!("expected two sinks");
        };
        assert_eq!(config.level_for(plain), "debug");
        assert_eq!(config.format_for(plain), LogFormat::Compact);
        assert_eq!(config.level_for(overridden), "error");
        assert_eq!(config.format_for(overridden), LogFormat::Pretty);
    }

    #[rstest]
    fn test_ansi_is_decided_per_sink() {
        let buffer = LogSink::new(LogTarget::Buffer(LogBuffer::new()));
        let config = RuntimeConfig::default()
            .with_sinks([buffer.clone()])
            .with_sink(LogTarget::Stdout);

        assert!(!config.ansi_for(&buffer));
        assert!(config.ansi_for(&config.sinks()[1]));
        assert!(config.ansi());
        assert!(!config.with_sinks([buffer]).ansi());
    }

    #[rstest]
    fn test_from_lookup_with_nothing_set_is_default() {
        let config = RuntimeConfig::from_lookup(|_| Ok(None)).unwrap();
        assert_eq!(config.level(), "info");
        assert_eq!(config.format(), LogFormat::Full);
    }

    #[rstest]
    fn test_from_lookup_propagates_bad_format() {
        let result = RuntimeConfig::from_lookup(|name| {
            Ok((name == FORMAT_VARIABLE).then(|| "xml".to_string()))
        });
        assert!(matches!(result, Err(ConfigError::InvalidFormat { .. })));
    }

    #[rstest]
    fn test_log_buffer_clones_share_bytes() {
        use std::io::Write;

        let buffer = LogBuffer::new();
        let shared = buffer.clone();
        shared.make_writer().write_all(b"line one\nline two\n").unwrap();

        assert_eq!(buffer.lines(), vec!["line one", "line two"]);
        buffer.clear();
        assert!(shared.is_empty());
    }
}
