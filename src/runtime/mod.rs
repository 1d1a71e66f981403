//! Explicitly scoped logging runtime and application entry point.
//!
//! A [`Runtime`] installs a `tracing-subscriber` formatter on the current
//! thread when started and removes it again when dropped. Each configured
//! [`LogSink`] gets its own formatting layer and level filter. There is no global
//! state: two runtimes on two threads do not interfere, and a runtime started
//! inside a test only sees that test's records.
//!
//! # Examples
//!
//! ```rust
//! use fecto::effect::{Effect, Fault};
//! use fecto::runtime::{App, ExitPolicy, LogBuffer, LogTarget, Runtime, RuntimeConfig};
//!
//! struct Greeter;
//!
//! impl App for Greeter {
//!     type Error = Fault;
//!     type Output = ();
//!
//!     fn name(&self) -> &str {
//!         "greeter"
//!     }
//!
//!     fn effect(&self) -> Effect<Fault, ()> {
//!         Effect::log_info("hello")
//!     }
//! }
//!
//! let buffer = LogBuffer::new();
//! let runtime = Runtime::start(
//!     RuntimeConfig::default().with_target(LogTarget::Buffer(buffer.clone())),
//! )
//! .unwrap();
//!
//! let _code = runtime.run_main(&Greeter, ExitPolicy::default());
//! assert!(buffer.contents().contains("hello"));
//! ```

mod app;
mod config;

pub use app::{App, ExitPolicy};
pub use config::{
    ConfigError, FORMAT_VARIABLE, LEVEL_VARIABLE, LogBuffer, LogBufferWriter, LogFormat, LogSink,
    LogTarget, RuntimeConfig,
};

use tracing::Dispatch;
use tracing::dispatcher::DefaultGuard;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;

type SinkLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Errors raised while starting a [`Runtime`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A level directive could not be parsed.
    #[error("invalid log level directive `{directive}`")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// The parser's error.
        #[source]
        source: ParseError,
    },

    /// The configuration itself was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A logging subscriber installed on the current thread.
///
/// Records emitted on this thread, including those of logging effects, go
/// to the configured target while the runtime is alive. Dropping it restores
/// whatever subscriber was active before.
#[derive(Debug)]
pub struct Runtime {
    config: RuntimeConfig,
    _guard: DefaultGuard,
}

impl Runtime {
    /// Validates `config` and installs its subscriber on the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidFilter`] if the default level or a
    /// sink's level does not parse.
    pub fn start(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let dispatch = build_dispatch(&config)?;
        let guard = tracing::dispatcher::set_default(&dispatch);
        Ok(Self {
            config,
            _guard: guard,
        })
    }

    /// Starts a runtime configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Config`] for a bad environment and
    /// [`RuntimeError::InvalidFilter`] for a bad level directive.
    pub fn from_env() -> Result<Self, RuntimeError> {
        Self::start(RuntimeConfig::from_env()?)
    }

    /// Returns the configuration this runtime was started with.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Runs the application's effect once and returns its result.
    ///
    /// Inside an `app` span, logs the start, then either the completion at
    /// `INFO` or the error at `ERROR`. A panic inside the effect is not
    /// intercepted.
    ///
    /// # Errors
    ///
    /// Returns the application's error if its effect fails.
    pub fn run_app<A>(&self, app: &A) -> Result<A::Output, A::Error>
    where
        A: App,
    {
        let span = tracing::info_span!(target: crate::effect::LOG_TARGET, "app", name = %app.name());
        let _entered = span.enter();
        tracing::info!(target: crate::effect::LOG_TARGET, "application started");

        let result = app.effect().run();
        match &result {
            Ok(_) => tracing::info!(target: crate::effect::LOG_TARGET, "application completed"),
            Err(error) => {
                tracing::error!(target: crate::effect::LOG_TARGET, %error, "application failed");
            }
        }
        result
    }

    /// Runs the application and converts its result into a process exit code.
    ///
    /// Success maps to [`ExitCode::SUCCESS`](std::process::ExitCode::SUCCESS),
    /// failure to `policy`'s error code.
    pub fn run_main<A>(&self, app: &A, policy: ExitPolicy) -> std::process::ExitCode
    where
        A: App,
    {
        match self.run_app(app) {
            Ok(_) => std::process::ExitCode::SUCCESS,
            Err(_) => std::process::ExitCode::from(policy.error_code()),
        }
    }
}

fn build_dispatch(config: &RuntimeConfig) -> Result<Dispatch, RuntimeError> {
    let layers = config
        .sinks()
        .iter()
        .map(|sink| sink_layer(config, sink))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dispatch::new(Registry::default().with(layers)))
}

fn sink_layer(config: &RuntimeConfig, sink: &LogSink) -> Result<SinkLayer, RuntimeError> {
    let filter = parse_filter(config.level_for(sink))?;

    let writer = match sink.target() {
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogTarget::Buffer(buffer) => BoxMakeWriter::new(buffer.clone()),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.ansi_for(sink))
        .with_target(true);

    let layer: SinkLayer = match config.format_for(sink) {
        LogFormat::Full => layer.with_filter(filter).boxed(),
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
        LogFormat::Pretty => layer.pretty().with_filter(filter).boxed(),
    };
    Ok(layer)
}

/// Parses a level directive.
///
/// Anything containing `=` or `,` goes to `EnvFilter` as is. A bare word must
/// name a level, so a typo cannot silently become a target directive that
/// filters out every record.
fn parse_filter(directive: &str) -> Result<EnvFilter, RuntimeError> {
    let invalid = |source: ParseError| RuntimeError::InvalidFilter {
        directive: directive.to_string(),
        source,
    };

    let trimmed = directive.trim();
    if trimmed.contains(['=', ',']) {
        return EnvFilter::try_new(trimmed).map_err(invalid);
    }

    let level = match trimmed.to_ascii_lowercase().as_str() {
        "warning" => LevelFilter::WARN,
        "critical" => LevelFilter::ERROR,
        word => word.parse::<LevelFilter>().map_err(|error| {
            let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(error);
            invalid(ParseError::from(boxed))
        })?,
    };
    EnvFilter::try_new(level.to_string()).map_err(invalid)
}
