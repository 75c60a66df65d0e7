//! Service State Machine
//!
//! A single process-wide readiness value, published through one atomic
//! cell. The lifecycle manager and the shutdown coordinator write it;
//! every request handler and the health probe read it. Reads vastly
//! outnumber writes, so the hot path is a single atomic load with no
//! lock.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Readiness state of the service
///
/// Transitions are monotonic: once `Ready` or `InitFailed` is reached
/// the state never returns to `Uninitialized` or `Initializing`.
/// `ShuttingDown` is reachable from every state. A fresh process
/// restart is the only recovery from `InitFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServiceState {
  /// Startup has not begun
  Uninitialized = 0,
  /// The engine initialization task is running
  Initializing = 1,
  /// The engine can service requests
  Ready = 2,
  /// Initialization retries are exhausted (terminal for serving)
  InitFailed = 3,
  /// A termination signal was received
  ShuttingDown = 4,
}

impl ServiceState {
  /// Stable name for logs and the health probe body
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Uninitialized => "uninitialized",
      Self::Initializing => "initializing",
      Self::Ready => "ready",
      Self::InitFailed => "init_failed",
      Self::ShuttingDown => "shutting_down",
    }
  }

  fn from_u8(raw: u8) -> Self {
    match raw {
      1 => Self::Initializing,
      2 => Self::Ready,
      3 => Self::InitFailed,
      4 => Self::ShuttingDown,
      _ => Self::Uninitialized,
    }
  }
}

impl fmt::Display for ServiceState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Shared writable view of the service state
///
/// Held by the lifecycle manager and the shutdown coordinator. Request
/// handlers get the read-only [`ReadinessGate`] instead.
#[derive(Debug, Clone)]
pub struct SharedState {
  cell: Arc<AtomicU8>,
}

impl SharedState {
  /// Creates a new state cell in `Uninitialized`
  #[must_use]
  pub fn new() -> Self {
    Self { cell: Arc::new(AtomicU8::new(ServiceState::Uninitialized as u8)) }
  }

  /// Current state
  #[must_use]
  pub fn load(&self) -> ServiceState {
    ServiceState::from_u8(self.cell.load(Ordering::Acquire))
  }

  /// Attempts the transition `from` → `to`
  ///
  /// Returns `false` if the current state is not `from`; the state is
  /// left untouched in that case. Monotonicity of the transition graph
  /// follows from every writer using this compare-and-swap.
  pub fn transition(&self, from: ServiceState, to: ServiceState) -> bool {
    self
      .cell
      .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
      .is_ok()
  }

  /// Forces the state to `ShuttingDown`, returning the previous state
  ///
  /// Shutdown is reachable from every state, so this is an
  /// unconditional swap rather than a compare-and-swap.
  pub fn begin_shutdown(&self) -> ServiceState {
    ServiceState::from_u8(self.cell.swap(ServiceState::ShuttingDown as u8, Ordering::AcqRel))
  }

  /// Read-only gate over the same cell
  #[must_use]
  pub fn gate(&self) -> ReadinessGate {
    ReadinessGate { cell: Arc::clone(&self.cell) }
  }
}

impl Default for SharedState {
  fn default() -> Self {
    Self::new()
  }
}

/// Lock-free readiness predicate
///
/// Consulted by every inbound request and by the health probe.
/// Never calls into the engine; it only inspects the published state.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
  cell: Arc<AtomicU8>,
}

impl ReadinessGate {
  /// `true` iff the service is `Ready`
  #[must_use]
  pub fn is_ready(&self) -> bool {
    self.cell.load(Ordering::Acquire) == ServiceState::Ready as u8
  }

  /// Current state, for the health probe body and logs
  #[must_use]
  pub fn state(&self) -> ServiceState {
    ServiceState::from_u8(self.cell.load(Ordering::Acquire))
  }
}
