//! # Logger
//!
//! Installs the global `tracing` subscriber of a modkit host. Events emitted by the
//! orchestrator (target `modkit`, field `mod_id`) and by features end up on the
//! console, in rolling log files, or both.
//!
//! * [`Logger::from_config`] builds everything from the host's [`LogConfig`].
//! * [`Logger::builder`] gives full control; the file-only settings (rotation,
//!   retention, JSON) become available once [`LoggerBuilder::path`] is set.
//! * `RUST_LOG` is honored unless [`LoggerBuilder::env_filter`] sets explicit directives.
//!
//! ## Example
//!
//! ```rust
//! # use modkit_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("charmony")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use modkit_domain::config::LogConfig;
use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug)]
struct LoggerSettings {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Configures and installs the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    settings: LoggerSettings,
    name: N,
    file: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Names the host; rolling files are called `<name>.<date>.log`.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()), file: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Minimum level emitted when no filter directive says otherwise.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Explicit filter directives (e.g., `modkit=debug,charmony=trace`), replacing `RUST_LOG`.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Writes rolling log files into `path`, creating it when needed.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut settings = self.settings;
        settings.path = Some(path.into());
        LoggerBuilder { settings, name: self.name, file: PhantomData }
    }

    /// Installs the subscriber.
    ///
    /// The returned [`Logger`] owns the background writer of the file output and must
    /// be kept alive until shutdown so buffered lines are flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for unusable settings,
    /// [`LoggerError::Appender`] when the log directory cannot be used and
    /// [`LoggerError::Subscriber`] when a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        validate(&self.settings, &name)?;
        let filter = env_filter(&self.settings)?;

        let mut layers: Vec<BoxedLayer<_>> = Vec::new();
        if self.settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &self.settings.path {
            Some(path) => {
                let (file_layer, guard) = file_layer(&self.settings, path, &name)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No output enabled. Enable the console or set a log directory.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(layers)
            .try_init()
            .context(format!("Installing the {name} subscriber"))?;

        Ok(Logger { guard })
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Number of rotated files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    /// Writes the files as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

/// Handle of the installed logging system.
///
/// Holds the worker guard of the non-blocking file writer; dropping it flushes and
/// stops file output.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: LoggerSettings::default(), name: NoName, file: PhantomData }
    }

    /// Installs the subscriber described by the host's log settings.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level, otherwise the
    /// errors of [`LoggerBuilder::init`].
    pub fn from_config(name: impl Into<String>, config: &LogConfig) -> Result<Self, LoggerError> {
        let level = parse_level(&config.level)?;
        let builder = Self::builder().name(name).level(level).console(config.console);

        match &config.dir {
            Some(dir) => builder.path(dir).json(config.json).init(),
            None => builder.init(),
        }
    }

    /// Whether log lines are also written to files.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logger shutting down, flushing file output");
        }
    }
}

fn file_layer<S>(
    settings: &LoggerSettings,
    path: &Path,
    name: &str,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(path).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Failed to create {}", path.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(settings.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(settings.max_files)
        .build(path)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let base = layer().with_writer(writer).with_ansi(false);
    let boxed = if settings.json { base.json().boxed() } else { base.boxed() };
    Ok((boxed, guard))
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}': {e}").into(),
        context: None,
    })
}

fn validate(settings: &LoggerSettings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    if settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(settings: &LoggerSettings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.env_filter {
        Some(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid filter '{directives}': {e}").into(),
                context: None,
            }
        }),
        None => Ok(builder.from_env_lossy()),
    }
}
