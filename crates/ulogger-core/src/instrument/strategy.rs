//! The three instrumentation strategies.
//!
//! | Strategy  | Before           | After success  | On failure                          |
//! |-----------|------------------|----------------|-------------------------------------|
//! | execution | start message    | end message    | not caught, nothing logged          |
//! | exception | -                | -              | failure record, re-raise / suppress |
//! | combined  | start message    | end message    | failure record, re-raise / suppress |
//!
//! Exception and combined also intercept panics unwinding out of the target.

use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use crate::error::UloggerError;
use crate::logging::{Failure, Logger};

/// Which messages an instrumented callable emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Start and end messages only; failures pass through untouched
    Execution,
    /// Failure records only
    Exception,
    /// Start, end and failure records
    #[default]
    Combined,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Execution, Strategy::Exception, Strategy::Combined];

    /// Configuration tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::Execution => "execution",
            Strategy::Exception => "exception",
            Strategy::Combined => "combined",
        }
    }

    pub fn logs_execution(&self) -> bool {
        matches!(self, Strategy::Execution | Strategy::Combined)
    }

    pub fn catches_failures(&self) -> bool {
        matches!(self, Strategy::Exception | Strategy::Combined)
    }

    /// Turn `target` into an instrumented callable logging to `logger`.
    ///
    /// This is the building block behind
    /// [`Decorator`](super::Decorator); use it directly when the logger is
    /// known up front.
    pub fn wrap<A, T, E, F>(
        self,
        name: impl Into<String>,
        logger: Logger,
        re_raise: bool,
        target: F,
    ) -> impl Fn(A) -> Result<Outcome<T>, E>
    where
        F: Fn(A) -> Result<T, E>,
        E: Display + 'static,
    {
        let name = name.into();
        move |args| run(self, re_raise, &name, &logger, || target(args))
    }
}

impl FromStr for Strategy {
    type Err = UloggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "execution" => Ok(Strategy::Execution),
            "exception" => Ok(Strategy::Exception),
            "combined" => Ok(Strategy::Combined),
            other => Err(UloggerError::UnknownStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result of an instrumented call whose failure was not propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The target returned normally
    Returned(T),
    /// The target failed, the failure was logged and `re_raise` was off
    Suppressed,
}

impl<T> Outcome<T> {
    pub fn is_returned(&self) -> bool {
        matches!(self, Outcome::Returned(_))
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Outcome::Suppressed)
    }

    /// `Some(value)` when the target returned.
    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Returned(value) => Some(value),
            Outcome::Suppressed => None,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Returned(value) => Outcome::Returned(f(value)),
            Outcome::Suppressed => Outcome::Suppressed,
        }
    }
}

pub(crate) fn start_message(name: &str) -> String {
    format!("{}() - Starting execution...", name)
}

pub(crate) fn end_message(name: &str) -> String {
    format!("{}() - Execution ended", name)
}

pub(crate) fn failure_message(name: &str, kind: &str) -> String {
    format!("{}() - A {} occurred.", name, kind)
}

/// Run `body` under `strategy`, logging to `logger`.
pub(crate) fn run<T, E>(
    strategy: Strategy,
    re_raise: bool,
    name: &str,
    logger: &Logger,
    body: impl FnOnce() -> Result<T, E>,
) -> Result<Outcome<T>, E>
where
    E: Display + 'static,
{
    match strategy {
        Strategy::Execution => execution(name, logger, body).map(Outcome::Returned),
        Strategy::Exception => guarded(name, logger, re_raise, body),
        Strategy::Combined => {
            logger.info(start_message(name));
            let outcome = guarded(name, logger, re_raise, body)?;
            if outcome.is_returned() {
                logger.info(end_message(name));
            }
            Ok(outcome)
        }
    }
}

fn execution<T, E>(
    name: &str,
    logger: &Logger,
    body: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    logger.info(start_message(name));
    let value = body()?;
    logger.info(end_message(name));
    Ok(value)
}

fn guarded<T, E>(
    name: &str,
    logger: &Logger,
    re_raise: bool,
    body: impl FnOnce() -> Result<T, E>,
) -> Result<Outcome<T>, E>
where
    E: Display + 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(value)) => Ok(Outcome::Returned(value)),
        Ok(Err(err)) => {
            let failure = Failure::capture(&err);
            logger.log_failure(failure_message(name, failure.kind()), failure);
            if re_raise {
                Err(err)
            } else {
                Ok(Outcome::Suppressed)
            }
        }
        Err(payload) => {
            logger.log_failure(
                failure_message(name, "panic"),
                Failure::from_panic(payload.as_ref()),
            );
            if re_raise {
                panic::resume_unwind(payload)
            } else {
                Ok(Outcome::Suppressed)
            }
        }
    }
}
