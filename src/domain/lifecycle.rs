//! Server readiness state machine.
//!
//! The process moves through exactly one of two paths:
//! `Starting → Listening` once the document store is connected and the
//! listener is bound, or `Starting → Terminated` when startup fails. There is
//! no way back to `Starting`. The current phase is published on a
//! [`tokio::sync::watch`] channel so the health endpoint and tests can
//! observe it.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;

/// Lifecycle phase of the server process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    /// Waiting on the document store connection.
    Starting,
    /// Listener bound and accepting requests.
    Listening {
        /// Address the listener is bound to.
        addr: SocketAddr,
    },
    /// Startup failed; the listener was never opened.
    Terminated,
}

impl ServerPhase {
    /// Short machine-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Listening { .. } => "listening",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ServerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listening { addr } => write!(f, "listening on {addr}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Rejected phase change.
#[derive(Debug, thiserror::Error)]
#[error("illegal phase transition {from} -> {to}")]
pub struct LifecycleError {
    /// Phase at the time of the request.
    pub from: ServerPhase,
    /// Requested phase.
    pub to: ServerPhase,
}

/// Shared handle on the server phase.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    sender: Arc<watch::Sender<ServerPhase>>,
}

impl Lifecycle {
    /// Creates a lifecycle in [`ServerPhase::Starting`].
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ServerPhase::Starting);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> ServerPhase {
        *self.sender.borrow()
    }

    /// Records that the listener is bound to `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] unless the current phase is `Starting`.
    pub fn mark_listening(&self, addr: SocketAddr) -> Result<(), LifecycleError> {
        self.advance(ServerPhase::Listening { addr })
    }

    /// Records that startup failed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] unless the current phase is `Starting`.
    pub fn mark_terminated(&self) -> Result<(), LifecycleError> {
        self.advance(ServerPhase::Terminated)
    }

    /// Returns a receiver that observes every phase change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ServerPhase> {
        self.sender.subscribe()
    }

    /// Waits until the phase leaves `Starting` and returns the new phase.
    pub async fn settled(&self) -> ServerPhase {
        let mut rx = self.subscribe();
        match rx.wait_for(|phase| *phase != ServerPhase::Starting).await {
            Ok(phase) => *phase,
            Err(_) => self.phase(),
        }
    }

    fn advance(&self, next: ServerPhase) -> Result<(), LifecycleError> {
        let mut rejected = None;
        self.sender.send_if_modified(|current| {
            if *current == ServerPhase::Starting {
                *current = next;
                true
            } else {
                rejected = Some(*current);
                false
            }
        });
        match rejected {
            None => {
                tracing::debug!(phase = %next, "server phase changed");
                Ok(())
            }
            Some(from) => Err(LifecycleError { from, to: next }),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, SocketAddrV4};

    use super::*;

    fn addr() -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 4000))
    }

    #[test]
    fn starts_in_starting_phase() {
        assert_eq!(Lifecycle::new().phase(), ServerPhase::Starting);
    }

    #[test]
    fn starting_to_listening_is_allowed() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.mark_listening(addr()).is_ok());
        assert_eq!(lifecycle.phase(), ServerPhase::Listening { addr: addr() });
    }

    #[test]
    fn starting_to_terminated_is_allowed() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.mark_terminated().is_ok());
        assert_eq!(lifecycle.phase(), ServerPhase::Terminated);
    }

    #[test]
    fn listening_cannot_terminate() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.mark_listening(addr()).is_ok());
        let err = lifecycle.mark_terminated().err();
        assert!(matches!(
            err,
            Some(LifecycleError {
                from: ServerPhase::Listening { .. },
                to: ServerPhase::Terminated,
            })
        ));
        assert_eq!(lifecycle.phase(), ServerPhase::Listening { addr: addr() });
    }

    #[test]
    fn terminated_is_final() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.mark_terminated().is_ok());
        assert!(lifecycle.mark_listening(addr()).is_err());
        assert!(lifecycle.mark_terminated().is_err());
        assert_eq!(lifecycle.phase(), ServerPhase::Terminated);
    }

    #[test]
    fn clones_share_the_phase() {
        let lifecycle = Lifecycle::new();
        let observer = lifecycle.clone();
        assert!(lifecycle.mark_terminated().is_ok());
        assert_eq!(observer.phase(), ServerPhase::Terminated);
    }

    #[tokio::test]
    async fn settled_resolves_after_transition() {
        let lifecycle = Lifecycle::new();
        let waiter = {
            let lifecycle = lifecycle.clone();
            tokio::spawn(async move { lifecycle.settled().await })
        };
        tokio::task::yield_now().await;
        assert!(lifecycle.mark_listening(addr()).is_ok());
        let phase = waiter.await.ok();
        assert_eq!(phase, Some(ServerPhase::Listening { addr: addr() }));
    }

    #[test]
    fn display_includes_address_when_listening() {
        let phase = ServerPhase::Listening { addr: addr() };
        assert_eq!(phase.to_string(), "listening on 127.0.0.1:4000");
        assert_eq!(ServerPhase::Terminated.to_string(), "terminated");
    }
}
