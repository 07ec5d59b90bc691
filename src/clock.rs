use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

/// Source of timestamps for note creation and edits.
pub trait Clock {
	fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock that only moves when told to. Used by tests and replays.
#[derive(Debug)]
pub struct ManualClock {
	current: Cell<DateTime<Utc>>,
}

impl ManualClock {
	pub fn new(start: DateTime<Utc>) -> Self { Self { current: Cell::new(start) } }

	pub fn advance(&self, by: Duration) { self.current.set(self.current.get() + by); }
}

impl<C: Clock + ?Sized> Clock for &C {
	fn now(&self) -> DateTime<Utc> { (**self).now() }
}

impl Clock for ManualClock {
	fn now(&self) -> DateTime<Utc> { self.current.get() }
}
