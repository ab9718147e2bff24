//! Test utilities for railway.
//!
//! Shared helpers for unit tests:
//! - Consistent tracing-based logging initialization
//! - Phase/section macros for readable test output
//! - A `block_on` test runner
//! - Outcome assertion macros
//! - Futures that stay pending for a fixed number of polls
//! - A call recorder for laziness checks
//!
//! # Example
//! ```
//! use railway::test_utils::{run_test, Yield};
//! use railway::success;
//!
//! run_test(|| async {
//!     let value = Yield::new(2, success::<i32, ()>(1)).await;
//!     assert_eq!(value, success(1));
//! });
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Once};
use std::task::{Context, Poll, Wake, Waker};

use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging with trace-level output.
///
/// Safe to call multiple times; only initializes once.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
///
/// The first call wins; later calls are no-ops.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

/// Run async test code to completion on the current thread.
pub fn run_test<F, Fut>(f: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    init_test_logging();
    futures_lite::future::block_on(f());
}

struct NoopWaker;

impl Wake for NoopWaker {
    fn wake(self: Arc<Self>) {}
}

/// A waker that does nothing, for polling futures by hand.
#[must_use]
pub fn noop_waker() -> Waker {
    Arc::new(NoopWaker).into()
}

/// A future that returns `Pending` a fixed number of times before resolving.
///
/// Each pending poll wakes itself, so executors keep polling it.
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Yield<T> {
    remaining: usize,
    value: Option<T>,
}

impl<T> Yield<T> {
    /// Resolves to `value` after `polls` pending polls.
    pub fn new(polls: usize, value: T) -> Self {
        Self {
            remaining: polls,
            value: Some(value),
        }
    }
}

impl<T> Unpin for Yield<T> {}

impl<T> Future for Yield<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        if self.remaining > 0 {
            self.remaining -= 1;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        Poll::Ready(self.value.take().expect("Yield polled after completion"))
    }
}

/// Records which callbacks ran, in order.
#[derive(Debug, Clone, Default)]
pub struct CallRecorder {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl CallRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call label.
    pub fn record(&self, label: &'static str) {
        self.calls.lock().expect("recorder lock poisoned").push(label);
    }

    /// Returns the labels recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("recorder lock poisoned").clone()
    }
}

/// Log a test phase transition with a visual separator.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "========================================");
        tracing::info!(phase = %$name, "TEST PHASE: {}", $name);
        tracing::info!(phase = %$name, "========================================");
    };
}

/// Log a section within a test phase.
#[macro_export]
macro_rules! test_section {
    ($name:expr) => {
        tracing::debug!(section = %$name, "--- {} ---", $name);
    };
}

/// Log test completion with summary.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test completed successfully: {}", $name);
    };
}

/// Assert that an outcome is a success carrying a specific value.
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Success(v) => assert_eq!(v, $expected),
            other => panic!("expected Success({:?}), got {:?}", $expected, other),
        }
    };
}

/// Assert that an outcome is a failure carrying a specific value.
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Failure(e) => assert_eq!(e, $expected),
            other => panic!("expected Failure({:?}), got {:?}", $expected, other),
        }
    };
}
