//! Logger facade
//!
//! Every log call takes the same path: pause gate, level gate, record
//! normalization, throttle, dispatch. One `Logger` owns its configuration,
//! reporter list and throttle state; derived loggers (`create`, `with_tag`,
//! ...) copy them and evolve independently afterwards.

use super::{
    clock::Clock,
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    log_arg::{IntoLogArgs, LogArg},
    log_level::{resolve_level, LevelInput, LogLevel},
    log_object::InputLogObject,
    log_type::{LogTypeDefinition, LogTypes},
    metrics::LoggerMetrics,
    options::{FormatOptions, LoggerConfig, LoggerOptions, LoggerSettings},
    pause::PauseController,
    prompt::{PromptAnswer, PromptOptions, Prompter},
    record_builder::RecordBuilder,
    reporter::{Reporter, ReporterContext, ReporterErrorCallback},
    throttle::{Decision, ThrottleConfig, ThrottleEngine},
};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

struct LoggerInner {
    settings: RwLock<Arc<LoggerSettings>>,
    /// Per-type call defaults, built once from the type table
    type_defaults: BTreeMap<String, InputLogObject>,
    dispatcher: Dispatcher,
    throttle: Mutex<ThrottleEngine>,
    /// Serialises log calls and deferred flushes on this instance
    operation: ReentrantMutex<()>,
    clock: Arc<dyn Clock>,
    pause: Arc<PauseController>,
    prompt: Option<Arc<dyn Prompter>>,
    on_reporter_error: Option<ReporterErrorCallback>,
    metrics: Arc<LoggerMetrics>,
}

impl LoggerInner {
    fn settings(&self) -> Arc<LoggerSettings> {
        Arc::clone(&self.settings.read())
    }

    fn dispatch(&self, record: &super::log_record::LogRecord, settings: &LoggerSettings) {
        self.dispatcher
            .dispatch(record, &ReporterContext { options: settings });
    }

    fn fire_flush(&self, generation: u64) {
        let _operation = self.operation.lock();
        let summary = self.throttle.lock().fire(generation);
        if let Some(summary) = summary {
            self.metrics.record_summary();
            self.dispatch(&summary, &self.settings());
        }
    }
}

impl Drop for LoggerInner {
    fn drop(&mut self) {
        // Report repeats still owed instead of losing them with the timer
        let summary = self.throttle.get_mut().flush(self.clock.as_ref());
        if let Some(summary) = summary {
            self.metrics.record_summary();
            let settings = Arc::clone(self.settings.get_mut());
            self.dispatch(&summary, &settings);
        }
    }
}

/// Structured logging facade.
///
/// Cheap to clone; clones share the same instance. Use [`create`](Self::create),
/// [`with_defaults`](Self::with_defaults) or [`with_tag`](Self::with_tag) for an
/// independent derived logger.
///
/// # Example
///
/// ```
/// use rust_log_facade::prelude::*;
///
/// let memory = MemoryReporter::new();
/// let logger = Logger::builder()
///     .reporter(memory.clone())
///     .tag("app")
///     .build();
///
/// logger.info("server started");
/// logger.warn(("disk usage", 91));
///
/// let records = memory.records();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].tag, "app");
/// assert_eq!(records[1].message(), "disk usage 91");
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

/// Entry point for one log type, obtained through [`Logger::get`]
#[derive(Clone, Copy)]
pub struct LogFn<'a> {
    logger: &'a Logger,
    log_type: &'a str,
    defaults: &'a InputLogObject,
}

impl<'a> LogFn<'a> {
    pub fn log_type(&self) -> &'a str {
        self.log_type
    }

    /// Defaults every call through this entry point starts from
    pub fn defaults(&self) -> &'a InputLogObject {
        self.defaults
    }

    /// Log `args`; a single structured object is unwrapped into the record
    pub fn call(&self, args: impl IntoLogArgs) {
        self.logger.submit(self.defaults, args.into_log_args(), false);
    }

    /// Log `args` literally, without structured-object unwrapping
    pub fn raw(&self, args: impl IntoLogArgs) {
        self.logger.submit(self.defaults, args.into_log_args(), true);
    }
}

impl fmt::Debug for LogFn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFn")
            .field("log_type", &self.log_type)
            .field("defaults", self.defaults)
            .finish()
    }
}

impl Logger {
    /// Logger with default options and no reporters
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(LoggerOptions::default())
    }

    #[must_use]
    pub fn with_options(options: LoggerOptions) -> Self {
        let LoggerOptions {
            level,
            types,
            reporters,
            defaults,
            throttle,
            throttle_min,
            format_options,
            clock,
            pause,
            prompt,
            on_reporter_error,
        } = options;

        let level = resolve_level(level.as_ref(), &types, None);
        let type_defaults = types
            .iter()
            .map(|(name, definition)| {
                // The type definition wins over logger-wide defaults
                let call_defaults = InputLogObject::new()
                    .log_type(name)
                    .merged(&defaults)
                    .merged(&definition.as_input());
                (name.to_string(), call_defaults)
            })
            .collect();

        let metrics = Arc::new(LoggerMetrics::new());
        let dispatcher = Dispatcher::new(
            reporters,
            Arc::clone(&metrics),
            on_reporter_error.clone(),
        );

        let settings = LoggerSettings {
            level,
            types,
            defaults,
            throttle,
            throttle_min,
            format_options,
        };

        Self {
            inner: Arc::new(LoggerInner {
                settings: RwLock::new(Arc::new(settings)),
                type_defaults,
                dispatcher,
                throttle: Mutex::new(ThrottleEngine::new(ThrottleConfig::new(
                    throttle,
                    throttle_min,
                ))),
                operation: ReentrantMutex::new(()),
                clock,
                pause,
                prompt,
                on_reporter_error,
                metrics,
            }),
        }
    }

    /// Current configuration as options, suitable for building a derived logger.
    ///
    /// The reporter list is a copy; the reporters themselves are shared.
    pub fn options(&self) -> LoggerOptions {
        let settings = self.inner.settings();
        LoggerOptions {
            level: Some(LevelInput::Level(settings.level)),
            types: settings.types.clone(),
            reporters: self.inner.dispatcher.reporters(),
            defaults: settings.defaults.clone(),
            throttle: settings.throttle,
            throttle_min: settings.throttle_min,
            format_options: settings.format_options.clone(),
            clock: Arc::clone(&self.inner.clock),
            pause: Arc::clone(&self.inner.pause),
            prompt: self.inner.prompt.clone(),
            on_reporter_error: self.inner.on_reporter_error.clone(),
        }
    }

    /// Settings snapshot as reporters see it
    pub fn settings(&self) -> Arc<LoggerSettings> {
        self.inner.settings()
    }

    /// Look up the entry point for a log type
    pub fn get(&self, log_type: &str) -> Option<LogFn<'_>> {
        self.inner
            .type_defaults
            .get_key_value(log_type)
            .map(|(name, defaults)| LogFn {
                logger: self,
                log_type: name,
                defaults,
            })
    }

    /// Names of every type this logger was built with
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.inner.type_defaults.keys().map(String::as_str)
    }

    /// Log through a named type
    pub fn call(&self, log_type: &str, args: impl IntoLogArgs) -> Result<()> {
        let entry = self
            .get(log_type)
            .ok_or_else(|| LoggerError::unknown_type(log_type))?;
        entry.call(args);
        Ok(())
    }

    /// Log through a named type without structured-object unwrapping
    pub fn raw(&self, log_type: &str, args: impl IntoLogArgs) -> Result<()> {
        let entry = self
            .get(log_type)
            .ok_or_else(|| LoggerError::unknown_type(log_type))?;
        entry.raw(args);
        Ok(())
    }

    /// Log a fatal error (level 0)
    pub fn fatal(&self, args: impl IntoLogArgs) {
        self.log_as("fatal", args.into_log_args());
    }

    /// Log an error (level 0)
    pub fn error(&self, args: impl IntoLogArgs) {
        self.log_as("error", args.into_log_args());
    }

    /// Log a warning (level 1)
    pub fn warn(&self, args: impl IntoLogArgs) {
        self.log_as("warn", args.into_log_args());
    }

    /// Log through the generic `log` type (level 2)
    pub fn log(&self, args: impl IntoLogArgs) {
        self.log_as("log", args.into_log_args());
    }

    /// Log an informational message (level 3)
    pub fn info(&self, args: impl IntoLogArgs) {
        self.log_as("info", args.into_log_args());
    }

    /// Log a successful outcome (level 3)
    pub fn success(&self, args: impl IntoLogArgs) {
        self.log_as("success", args.into_log_args());
    }

    /// Log a failed outcome (level 3)
    pub fn fail(&self, args: impl IntoLogArgs) {
        self.log_as("fail", args.into_log_args());
    }

    /// Log that something is ready (level 3)
    pub fn ready(&self, args: impl IntoLogArgs) {
        self.log_as("ready", args.into_log_args());
    }

    /// Log that something is starting (level 3)
    pub fn start(&self, args: impl IntoLogArgs) {
        self.log_as("start", args.into_log_args());
    }

    /// Log debugging detail (level 4)
    pub fn debug(&self, args: impl IntoLogArgs) {
        self.log_as("debug", args.into_log_args());
    }

    /// Log tracing detail (level 5)
    pub fn trace(&self, args: impl IntoLogArgs) {
        self.log_as("trace", args.into_log_args());
    }

    /// Log at the most detailed level; shown only when the logger is verbose
    pub fn verbose(&self, args: impl IntoLogArgs) {
        self.log_as("verbose", args.into_log_args());
    }

    // Types missing from a custom table still log, with the logger defaults only
    fn log_as(&self, log_type: &str, args: Vec<LogArg>) {
        match self.inner.type_defaults.get(log_type) {
            Some(defaults) => self.submit(defaults, args, false),
            None => {
                let defaults = InputLogObject::new()
                    .log_type(log_type)
                    .merged(&self.inner.settings().defaults);
                self.submit(&defaults, args, false);
            }
        }
    }

    fn submit(&self, defaults: &InputLogObject, args: Vec<LogArg>, raw: bool) {
        let mut pending = Some(args);
        let deferred = self.inner.pause.defer_if_paused(|| {
            let logger = self.clone();
            let defaults = defaults.clone();
            let args = pending.take().unwrap_or_default();
            Box::new(move || logger.process(&defaults, args, raw))
        });

        if deferred {
            self.inner.metrics.record_queued();
        } else if let Some(args) = pending {
            self.process(defaults, args, raw);
        }
    }

    fn process(&self, defaults: &InputLogObject, args: Vec<LogArg>, raw: bool) {
        let inner = &self.inner;
        let _operation = inner.operation.lock();
        let settings = inner.settings();

        let call_level = resolve_level(defaults.level.as_ref(), &settings.types, Some(LogLevel(0)));
        if call_level > settings.level {
            inner.metrics.record_filtered();
            return;
        }

        let record =
            RecordBuilder::new(&settings.types).build(defaults, args, raw, inner.clock.now());

        let weak = Arc::downgrade(inner);
        let decision = inner
            .throttle
            .lock()
            .process(record, inner.clock.as_ref(), move |generation| {
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.fire_flush(generation);
                    }
                })
            });

        match decision {
            Decision::Emit { summary, record } => {
                if let Some(summary) = summary {
                    inner.metrics.record_summary();
                    inner.dispatch(&summary, &settings);
                }
                inner.dispatch(&record, &settings);
            }
            Decision::Suppress => {
                inner.metrics.record_suppressed();
            }
        }
    }

    pub fn level(&self) -> LogLevel {
        self.inner.settings().level
    }

    /// Set the active level; type names resolve through the type table and
    /// unknown names leave the level unchanged
    pub fn set_level(&self, level: impl Into<LevelInput>) {
        let input = level.into();
        let mut settings = self.inner.settings.write();
        let resolved = resolve_level(Some(&input), &settings.types, Some(settings.level));
        Arc::make_mut(&mut settings).level = resolved;
    }

    pub fn add_reporter(&self, reporter: Arc<dyn Reporter>) -> &Self {
        self.inner.dispatcher.add(reporter);
        self
    }

    /// Remove a reporter by identity. Returns whether it was registered.
    pub fn remove_reporter(&self, reporter: &Arc<dyn Reporter>) -> bool {
        self.inner.dispatcher.remove(reporter)
    }

    pub fn clear_reporters(&self) -> &Self {
        self.inner.dispatcher.clear();
        self
    }

    pub fn set_reporters(&self, reporters: Vec<Arc<dyn Reporter>>) -> &Self {
        self.inner.dispatcher.replace(reporters);
        self
    }

    pub fn reporters(&self) -> Vec<Arc<dyn Reporter>> {
        self.inner.dispatcher.reporters()
    }

    /// Independent logger built from this one's options with `configure` applied
    #[must_use]
    pub fn create<F>(&self, configure: F) -> Logger
    where
        F: FnOnce(&mut LoggerOptions),
    {
        let mut options = self.options();
        configure(&mut options);
        Logger::with_options(options)
    }

    /// Derived logger whose defaults are overlaid with `defaults`
    #[must_use]
    pub fn with_defaults(&self, defaults: InputLogObject) -> Logger {
        self.create(|options| options.defaults.merge(&defaults))
    }

    /// Derived logger tagged `tag`, or `parent:tag` when already tagged
    #[must_use]
    pub fn with_tag(&self, tag: &str) -> Logger {
        let tag = match self.inner.settings().defaults.tag.as_deref() {
            Some(parent) if !parent.is_empty() => format!("{}:{}", parent, tag),
            _ => tag.to_string(),
        };
        self.with_defaults(InputLogObject::new().tag(tag))
    }

    /// Queue calls on every logger sharing this pause controller
    pub fn pause_logs(&self) {
        self.inner.pause.pause();
    }

    /// Replay queued calls in order, then log normally again
    pub fn resume_logs(&self) {
        self.inner.pause.resume();
    }

    pub fn pause_controller(&self) -> &Arc<PauseController> {
        &self.inner.pause
    }

    /// Ask a question through the configured prompter
    pub fn prompt(&self, message: &str, options: &PromptOptions) -> Result<PromptAnswer> {
        match self.inner.prompt {
            Some(ref prompter) => prompter.prompt(message, options),
            None => Err(LoggerError::unsupported("prompt")),
        }
    }

    /// Emit any pending repeat summary now, then flush every reporter
    pub fn flush(&self) -> Result<()> {
        {
            let _operation = self.inner.operation.lock();
            let summary = self.inner.throttle.lock().flush(self.inner.clock.as_ref());
            if let Some(summary) = summary {
                self.inner.metrics.record_summary();
                self.inner.dispatch(&summary, &self.inner.settings());
            }
        }
        self.inner.dispatcher.flush()
    }

    /// Get logger metrics for monitoring
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    #[deprecated(since = "0.1.0", note = "Use add_reporter() instead")]
    pub fn add(&self, reporter: Arc<dyn Reporter>) -> &Self {
        self.add_reporter(reporter)
    }

    #[deprecated(since = "0.1.0", note = "Use remove_reporter() instead")]
    pub fn remove(&self, reporter: &Arc<dyn Reporter>) -> bool {
        self.remove_reporter(reporter)
    }

    #[deprecated(since = "0.1.0", note = "Use clear_reporters() instead")]
    pub fn clear(&self) -> &Self {
        self.clear_reporters()
    }

    #[deprecated(since = "0.1.0", note = "Use with_tag() instead")]
    #[must_use]
    pub fn with_scope(&self, tag: &str) -> Logger {
        self.with_tag(tag)
    }

    #[deprecated(since = "0.1.0", note = "Use pause_logs() instead")]
    pub fn pause(&self) {
        self.pause_logs();
    }

    #[deprecated(since = "0.1.0", note = "Use resume_logs() instead")]
    pub fn resume(&self) {
        self.resume_logs();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.inner.settings();
        f.debug_struct("Logger")
            .field("level", &settings.level)
            .field("tag", &settings.defaults.tag)
            .field("reporters", &self.inner.dispatcher.len())
            .field("clock", &self.inner.clock)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .level("debug")
///     .reporter(BasicReporter::new())
///     .throttle(Duration::from_millis(500))
///     .throttle_min(3)
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::DEBUG);
/// ```
pub struct LoggerBuilder {
    options: LoggerOptions,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            options: LoggerOptions::default(),
        }
    }

    /// Set the active level: a number or a type name
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<LevelInput>) -> Self {
        self.options.level = Some(level.into());
        self
    }

    /// Read the level from an environment variable, if set.
    ///
    /// Accepts a number or a type name; an unset or empty variable keeps the
    /// current setting.
    #[must_use = "builder methods return a new value"]
    pub fn level_from_env(mut self, var: &str) -> Self {
        if let Ok(value) = std::env::var(var) {
            let value = value.trim();
            if !value.is_empty() {
                self.options.level = Some(match value.parse::<i32>() {
                    Ok(number) => LevelInput::from(number),
                    Err(_) => LevelInput::from(value.to_lowercase()),
                });
            }
        }
        self
    }

    /// Replace the whole type table
    #[must_use = "builder methods return a new value"]
    pub fn types(mut self, types: LogTypes) -> Self {
        self.options.types = types;
        self
    }

    /// Add or replace one log type
    #[must_use = "builder methods return a new value"]
    pub fn log_type(mut self, name: impl Into<String>, definition: LogTypeDefinition) -> Self {
        self.options.types.insert(name, definition);
        self
    }

    /// Add a reporter
    #[must_use = "builder methods return a new value"]
    pub fn reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.options.reporters.push(Arc::new(reporter));
        self
    }

    /// Add a reporter that is also held elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn shared_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.options.reporters.push(reporter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn defaults(mut self, defaults: InputLogObject) -> Self {
        self.options.defaults = defaults;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.options.defaults.tag = Some(tag.into());
        self
    }

    /// Window within which identical records are coalesced
    #[must_use = "builder methods return a new value"]
    pub fn throttle(mut self, window: Duration) -> Self {
        self.options.throttle = window;
        self
    }

    /// Identical records emitted per window before suppression starts
    #[must_use = "builder methods return a new value"]
    pub fn throttle_min(mut self, min: u32) -> Self {
        self.options.throttle_min = min;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format_options(mut self, format_options: FormatOptions) -> Self {
        self.options.format_options = format_options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.options.clock = clock;
        self
    }

    /// Use a dedicated pause controller instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn pause_controller(mut self, pause: Arc<PauseController>) -> Self {
        self.options.pause = pause;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prompter<P: Prompter + 'static>(mut self, prompter: P) -> Self {
        self.options.prompt = Some(Arc::new(prompter));
        self
    }

    /// Set a callback invoked whenever a reporter fails
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .on_reporter_error(Arc::new(|reporter: &str, error: &LoggerError| {
    ///         eprintln!("ALERT: {} failed: {}", reporter, error);
    ///     }))
    ///     .build();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_reporter_error(mut self, callback: ReporterErrorCallback) -> Self {
        self.options.on_reporter_error = Some(callback);
        self
    }

    /// Apply a loaded configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: &LoggerConfig) -> Self {
        config.apply(&mut self.options);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger::with_options(self.options)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
