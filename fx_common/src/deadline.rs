//! Deadline budgets for the two hops of the relay.
//!
//! Every bounded call takes an absolute `Instant` rather than a duration, so a
//! nested call can never outlive its caller. `DeadlineBudget` splits the
//! server's per-request budget between the upstream fetch and the ledger, and
//! `ensure_client_headroom` checks the same relation across the process
//! boundary.
//!
//! Both checks run while configuration is loaded. A budget that cannot fit is
//! rejected up front instead of producing a timeout on every request.
use std::time::Duration;

use tokio::time::Instant;

use crate::error::ConfigError;
use crate::net::{REQUEST_TIMEOUT_MS, STORE_TIMEOUT_MS, UPSTREAM_TIMEOUT_MS};

/// Ledger operations per acquisition: `exists`, then `insert_if_absent`.
pub const LEDGER_CALLS: u32 = 2;

/// Validated split of one acquisition's time budget.
///
/// An acquisition makes one upstream fetch and up to two ledger calls, each
/// bounded by `store`. Invariant: `upstream + 2 * store < request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineBudget {
    request: Duration,
    upstream: Duration,
    store: Duration,
}

impl DeadlineBudget {
    /// Build a budget, failing if the parts cannot fit in `request`.
    pub fn new(request: Duration, upstream: Duration, store: Duration) -> Result<Self, ConfigError> {
        for (name, value) in [("request", request), ("upstream", upstream), ("store", store)] {
            if value.is_zero() {
                return Err(ConfigError::ZeroTimeout(name));
            }
        }
        if upstream + store * LEDGER_CALLS >= request {
            return Err(ConfigError::BudgetExceeded {
                request,
                upstream,
                store,
            });
        }
        Ok(Self {
            request,
            upstream,
            store,
        })
    }

    /// Same as [`Self::new`] with millisecond inputs.
    pub fn from_millis(request: u64, upstream: u64, store: u64) -> Result<Self, ConfigError> {
        Self::new(
            Duration::from_millis(request),
            Duration::from_millis(upstream),
            Duration::from_millis(store),
        )
    }

    /// Overall time allowed for one acquisition.
    pub fn request(&self) -> Duration {
        self.request
    }

    /// Time allowed for the upstream fetch.
    pub fn upstream(&self) -> Duration {
        self.upstream
    }

    /// Time allowed for a single ledger operation.
    pub fn store(&self) -> Duration {
        self.store
    }

    /// Outer deadline of a request that starts at `start`.
    pub fn outer_deadline(&self, start: Instant) -> Instant {
        start + self.request
    }

    /// Deadline of the upstream fetch.
    ///
    /// Never later than `outer - 2 * store`, so both ledger calls keep their
    /// share even when the caller's outer deadline is tighter than this budget.
    pub fn upstream_deadline(&self, now: Instant, outer: Instant) -> Instant {
        let reserved = outer.checked_sub(self.store * LEDGER_CALLS).unwrap_or(now);
        (now + self.upstream).min(reserved)
    }

    /// Deadline of one ledger operation, clipped to the outer deadline.
    pub fn store_deadline(&self, now: Instant, outer: Instant) -> Instant {
        (now + self.store).min(outer)
    }
}

impl Default for DeadlineBudget {
    fn default() -> Self {
        Self {
            request: Duration::from_millis(REQUEST_TIMEOUT_MS),
            upstream: Duration::from_millis(UPSTREAM_TIMEOUT_MS),
            store: Duration::from_millis(STORE_TIMEOUT_MS),
        }
    }
}

/// Check that a client waiting `client` can outlast a server working within
/// `server_budget`, once `transport` is set aside for the round trip.
pub fn ensure_client_headroom(
    client: Duration,
    server_budget: Duration,
    transport: Duration,
) -> Result<(), ConfigError> {
    if client.is_zero() {
        return Err(ConfigError::ZeroTimeout("client"));
    }
    if client <= server_budget + transport {
        return Err(ConfigError::ClientTooShort {
            client,
            server_budget,
            transport,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{CLIENT_TIMEOUT_MS, TRANSPORT_ALLOWANCE_MS};

    #[test]
    fn default_budget_is_valid() {
        let budget = DeadlineBudget::default();
        assert_eq!(
            DeadlineBudget::new(budget.request(), budget.upstream(), budget.store()),
            Ok(budget)
        );
    }

    #[test]
    fn rejects_budget_without_headroom() {
        assert!(matches!(
            DeadlineBudget::from_millis(210, 200, 10),
            Err(ConfigError::BudgetExceeded { .. })
        ));
        // Room for one ledger call is not enough: the insert follows the lookup.
        assert!(matches!(
            DeadlineBudget::from_millis(220, 200, 10),
            Err(ConfigError::BudgetExceeded { .. })
        ));
        assert!(DeadlineBudget::from_millis(221, 200, 10).is_ok());
    }

    #[test]
    fn rejects_zero_timeouts() {
        assert_eq!(
            DeadlineBudget::from_millis(250, 200, 0),
            Err(ConfigError::ZeroTimeout("store"))
        );
        assert_eq!(
            DeadlineBudget::from_millis(0, 0, 0),
            Err(ConfigError::ZeroTimeout("request"))
        );
    }

    #[test]
    fn upstream_deadline_reserves_store_share() {
        let budget = DeadlineBudget::from_millis(250, 200, 20).unwrap();
        let now = Instant::now();

        let outer = budget.outer_deadline(now);
        assert_eq!(budget.upstream_deadline(now, outer), now + Duration::from_millis(200));

        // A tighter outer deadline squeezes the fetch, not the two ledger calls.
        let tight = now + Duration::from_millis(100);
        assert_eq!(budget.upstream_deadline(now, tight), now + Duration::from_millis(60));
    }

    #[test]
    fn store_deadline_is_clipped_to_outer() {
        let budget = DeadlineBudget::from_millis(250, 200, 20).unwrap();
        let now = Instant::now();
        let outer = now + Duration::from_millis(5);
        assert_eq!(budget.store_deadline(now, outer), outer);
        let roomy = now + Duration::from_secs(1);
        assert_eq!(budget.store_deadline(now, roomy), now + Duration::from_millis(20));
    }

    #[test]
    fn client_headroom() {
        let ms = Duration::from_millis;
        assert!(
            ensure_client_headroom(
                ms(CLIENT_TIMEOUT_MS),
                ms(REQUEST_TIMEOUT_MS),
                ms(TRANSPORT_ALLOWANCE_MS)
            )
            .is_ok()
        );
        assert!(matches!(
            ensure_client_headroom(ms(300), ms(210), ms(90)),
            Err(ConfigError::ClientTooShort { .. })
        ));
    }
}
