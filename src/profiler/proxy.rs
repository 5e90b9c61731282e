//! Forwarding decorator that times profiled operations
//!
//! A capability trait gets profiling support by implementing itself for
//! `Profiled<T>` where every method routes through [`Profiled::intercept`],
//! [`Profiled::intercept_async`] or, for methods that cannot fail,
//! [`Profiled::forward`]:
//!
//! ```rust,ignore
//! #[async_trait]
//! impl<T: PageParser> PageParser for Profiled<T> {
//!     async fn parse(&self, url: &str) -> Result<PageContents> {
//!         self.intercept_async("parse", |parser| parser.parse(url)).await
//!     }
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::capability::CapabilitySet;
use super::ledger::{OperationKey, ProfilingState};
use crate::utils::clock::{elapsed_between, Clock};
use crate::utils::error::ProfilerError;

/// A target wrapped by the profiler
///
/// Behaves exactly like the target: results and errors pass through
/// untouched. Profiled operations additionally add their wall-clock time to
/// the shared ledger.
#[derive(Debug)]
pub struct Profiled<T> {
    target: T,
    capabilities: &'static CapabilitySet,
    target_type: &'static str,
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
}

impl<T> Profiled<T> {
    pub(crate) fn new(
        target: T,
        capabilities: &'static CapabilitySet,
        clock: Arc<dyn Clock>,
        state: Arc<ProfilingState>,
    ) -> Self {
        Self {
            target,
            capabilities,
            target_type: std::any::type_name::<T>(),
            clock,
            state,
        }
    }

    /// Forward a synchronous call, timing it when `operation` is profiled
    pub fn intercept<R, E>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&T) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<ProfilerError>,
    {
        let _timer = self.start(operation)?;
        call(&self.target)
    }

    /// Forward an asynchronous call, timing it when `operation` is profiled
    ///
    /// The timer lives inside the returned future, so a call that is dropped
    /// before completion is still recorded.
    pub async fn intercept_async<'a, R, E, F, Fut>(
        &'a self,
        operation: &'static str,
        call: F,
    ) -> Result<R, E>
    where
        F: FnOnce(&'a T) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: From<ProfilerError>,
    {
        let _timer = self.start(operation)?;
        call(&self.target).await
    }

    /// Forward an infallible call, timing it when `operation` is profiled
    ///
    /// There is no error channel for an undeclared `operation`; debug builds
    /// panic on it and release builds forward it untimed.
    pub fn forward<R>(&self, operation: &'static str, call: impl FnOnce(&T) -> R) -> R {
        let timer = self.start(operation);
        debug_assert!(
            timer.is_ok(),
            "{} has no operation named '{operation}'",
            self.capabilities.name
        );
        let _timer = timer
            .inspect_err(|e| tracing::warn!(error = %e, "Forwarding undeclared operation untimed"))
            .ok()
            .flatten();
        call(&self.target)
    }

    fn start(&self, operation: &'static str) -> Result<Option<CallTimer<'_>>, ProfilerError> {
        let op = self
            .capabilities
            .operation(operation)
            .ok_or(ProfilerError::UndeclaredOperation {
                capability: self.capabilities.name,
                operation,
            })?;

        if !op.profiled {
            return Ok(None);
        }

        Ok(Some(CallTimer {
            key: OperationKey::new(self.target_type, op.signature),
            started_at: self.clock.now(),
            clock: self.clock.as_ref(),
            state: &self.state,
        }))
    }
}

/// Records the elapsed time of one call when dropped
struct CallTimer<'a> {
    key: OperationKey,
    started_at: DateTime<Utc>,
    clock: &'a dyn Clock,
    state: &'a ProfilingState,
}

impl Drop for CallTimer<'_> {
    fn drop(&mut self) {
        let elapsed = elapsed_between(self.started_at, self.clock.now());
        self.state.record(self.key, elapsed);
    }
}
