//! Injectable time source so tests can assert exact timestamps.

use time::OffsetDateTime;

/// Capability used by the repository for `created_at`/`updated_at` stamps.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> OffsetDateTime {
        C::now(self)
    }
}
