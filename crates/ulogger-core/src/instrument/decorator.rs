//! Decorators that bind a strategy to one callable.
//!
//! A [`Decorator`] is configured first and then applied to exactly one
//! target, which consumes it and yields an [`Instrumented`] callable:
//!
//! ```text
//! Decorator (AwaitingTarget) --apply(target)--> Instrumented (BoundToTarget)
//! ```
//!
//! Each call resolves its logger in this order:
//!
//! 1. the owner's own logger, for method calls whose owner implements
//!    [`LoggerSource`] and returns one;
//! 2. the logger given to [`Decorator::with_logger`];
//! 3. a default logger created through the registry on first use and then
//!    cached on the instrumented value.
//!
//! Creating the default logger opens its file. [`Instrumented::try_call`]
//! reports a failure to do so as an error; [`Instrumented::call`] logs a
//! warning and sends that call's records to `tracing` instead.

use std::fmt::Display;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::warn;

use super::strategy::{self, Outcome, Strategy};
use crate::error::UloggerResult;
use crate::logging::{Logger, LoggerConfig, LoggerRegistry, TracingSink};
use crate::naming;

/// Lifecycle of a decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Configured, no target yet
    AwaitingTarget,
    /// Applied to its target; terminal
    BoundToTarget,
}

/// Implemented by types that may carry their own logger.
///
/// Instrumented methods called on such an owner log to the owner's logger
/// instead of the decorator's.
pub trait LoggerSource {
    /// The owner's logger, if it has one.
    fn logger(&self) -> Option<&Logger> {
        None
    }
}

impl LoggerSource for Logger {
    fn logger(&self) -> Option<&Logger> {
        Some(self)
    }
}

impl<T: LoggerSource + ?Sized> LoggerSource for Arc<T> {
    fn logger(&self) -> Option<&Logger> {
        (**self).logger()
    }
}

/// Instrumentation settings waiting for a target.
#[derive(Debug, Default)]
pub struct Decorator {
    strategy: Strategy,
    logger: Option<Logger>,
    re_raise: Option<bool>,
    registry: Option<Arc<LoggerRegistry>>,
    default_config: Option<LoggerConfig>,
}

impl Decorator {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Build from a strategy tag (`"execution"`, `"exception"`, `"combined"`).
    ///
    /// Unknown tags are rejected here rather than at call time.
    pub fn from_tag(tag: &str) -> UloggerResult<Self> {
        Ok(Self::new(tag.parse()?))
    }

    /// Log to `logger` unless the owner of a method call has its own.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Propagate failures after logging them (default), or return
    /// [`Outcome::Suppressed`] instead.
    pub fn re_raise(mut self, re_raise: bool) -> Self {
        self.re_raise = Some(re_raise);
        self
    }

    /// Registry used to build the default logger. Defaults to the global one.
    pub fn with_registry(mut self, registry: Arc<LoggerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Configuration of the default logger. Defaults to [`LoggerConfig::default`].
    pub fn with_default_config(mut self, config: LoggerConfig) -> Self {
        self.default_config = Some(config);
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn mode(&self) -> Mode {
        Mode::AwaitingTarget
    }

    /// Bind to `target`, naming it after its function path.
    ///
    /// Closures are named after the function that defines them; use
    /// [`Decorator::apply_named`] for a precise name.
    pub fn apply<F>(self, target: F) -> Instrumented<F> {
        let name = naming::type_label::<F>();
        self.apply_named(name, target)
    }

    /// Bind to `target` under an explicit name.
    ///
    /// The target is not called.
    pub fn apply_named<F>(self, name: impl Into<String>, target: F) -> Instrumented<F> {
        Instrumented {
            name: name.into(),
            strategy: self.strategy,
            re_raise: self.re_raise.unwrap_or(true),
            logger: self.logger,
            registry: self.registry.unwrap_or_else(LoggerRegistry::global),
            default_config: self.default_config.unwrap_or_default(),
            default_logger: OnceLock::new(),
            default_init: Mutex::new(()),
            target,
        }
    }
}

/// A callable bound to its instrumentation.
pub struct Instrumented<F> {
    name: String,
    strategy: Strategy,
    re_raise: bool,
    logger: Option<Logger>,
    registry: Arc<LoggerRegistry>,
    default_config: LoggerConfig,
    default_logger: OnceLock<Logger>,
    default_init: Mutex<()>,
    target: F,
}

impl<F> Instrumented<F> {
    /// Name used in log messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn mode(&self) -> Mode {
        Mode::BoundToTarget
    }

    pub fn reraises(&self) -> bool {
        self.re_raise
    }

    /// The pre-bound logger, or the default one if it has been created.
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref().or_else(|| self.default_logger.get())
    }

    /// The wrapped callable.
    pub fn target(&self) -> &F {
        &self.target
    }

    /// Call a free-function target.
    pub fn call<A, T, E>(&self, args: A) -> Result<Outcome<T>, E>
    where
        F: Fn(A) -> Result<T, E>,
        E: Display + 'static,
    {
        let logger = self.resolve_logger(None);
        strategy::run(self.strategy, self.re_raise, &self.name, &logger, || {
            (self.target)(args)
        })
    }

    /// Like [`Instrumented::call`], but fails without calling the target
    /// when the default logger cannot be created.
    pub fn try_call<A, T, E>(&self, args: A) -> UloggerResult<Result<Outcome<T>, E>>
    where
        F: Fn(A) -> Result<T, E>,
        E: Display + 'static,
    {
        let logger = self.try_resolve_logger(None)?;
        Ok(strategy::run(self.strategy, self.re_raise, &self.name, &logger, || {
            (self.target)(args)
        }))
    }

    /// Call a method target on `owner`.
    ///
    /// `owner` is passed to the target as its first argument and is asked for
    /// its own logger first.
    pub fn call_method<O, A, T, E>(&self, owner: &O, args: A) -> Result<Outcome<T>, E>
    where
        O: LoggerSource + ?Sized,
        F: Fn(&O, A) -> Result<T, E>,
        E: Display + 'static,
    {
        let logger = self.resolve_logger(owner.logger());
        strategy::run(self.strategy, self.re_raise, &self.name, &logger, || {
            (self.target)(owner, args)
        })
    }

    /// Like [`Instrumented::call_method`], but fails without calling the
    /// target when the default logger cannot be created.
    pub fn try_call_method<O, A, T, E>(
        &self,
        owner: &O,
        args: A,
    ) -> UloggerResult<Result<Outcome<T>, E>>
    where
        O: LoggerSource + ?Sized,
        F: Fn(&O, A) -> Result<T, E>,
        E: Display + 'static,
    {
        let logger = self.try_resolve_logger(owner.logger())?;
        Ok(strategy::run(self.strategy, self.re_raise, &self.name, &logger, || {
            (self.target)(owner, args)
        }))
    }

    /// Bind the method to `owner`, like `owner.method` without the call.
    pub fn bind<'a, O>(&'a self, owner: &'a O) -> BoundMethod<'a, O, F>
    where
        O: LoggerSource + ?Sized,
    {
        BoundMethod {
            instrumented: self,
            owner,
        }
    }

    /// The logger a call without an owner logger would use, creating the
    /// default logger if needed.
    pub fn ensure_logger(&self) -> UloggerResult<Logger> {
        self.try_resolve_logger(None)
    }

    fn try_resolve_logger(&self, owner_logger: Option<&Logger>) -> UloggerResult<Logger> {
        if let Some(logger) = owner_logger.or(self.logger.as_ref()) {
            return Ok(logger.clone());
        }
        if let Some(logger) = self.default_logger.get() {
            return Ok(logger.clone());
        }

        // Serializes creation so concurrent first calls open the file once.
        let _guard = self.default_init.lock();
        if let Some(logger) = self.default_logger.get() {
            return Ok(logger.clone());
        }
        let logger = self.registry.create_logger(self.default_config.clone())?;
        Ok(self.default_logger.get_or_init(|| logger).clone())
    }

    fn resolve_logger(&self, owner_logger: Option<&Logger>) -> Logger {
        match self.try_resolve_logger(owner_logger) {
            Ok(logger) => logger,
            Err(e) => {
                // Not cached: the next call retries the file.
                warn!(
                    callable = %self.name,
                    logger = %self.default_config.name,
                    error = %e,
                    "Failed to create default logger, sending records to tracing"
                );
                let fallback = Logger::new(self.default_config.name.clone());
                fallback.set_level(self.default_config.level);
                fallback.add_sink(Arc::new(TracingSink));
                fallback
            }
        }
    }
}

impl<F> std::fmt::Debug for Instrumented<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instrumented")
            .field("name", &self.name)
            .field("strategy", &self.strategy)
            .field("re_raise", &self.re_raise)
            .field("logger", &self.logger())
            .finish()
    }
}

/// An instrumented method bound to its owner.
pub struct BoundMethod<'a, O: ?Sized, F> {
    instrumented: &'a Instrumented<F>,
    owner: &'a O,
}

impl<'a, O, F> BoundMethod<'a, O, F>
where
    O: LoggerSource + ?Sized,
{
    pub fn owner(&self) -> &O {
        self.owner
    }

    pub fn call<A, T, E>(&self, args: A) -> Result<Outcome<T>, E>
    where
        F: Fn(&O, A) -> Result<T, E>,
        E: Display + 'static,
    {
        self.instrumented.call_method(self.owner, args)
    }

    pub fn try_call<A, T, E>(&self, args: A) -> UloggerResult<Result<Outcome<T>, E>>
    where
        F: Fn(&O, A) -> Result<T, E>,
        E: Display + 'static,
    {
        self.instrumented.try_call_method(self.owner, args)
    }
}

impl<O: ?Sized, F> Clone for BoundMethod<'_, O, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized, F> Copy for BoundMethod<'_, O, F> {}
