use core::time::Duration;

use crate::hal::Timer;

/// Fixed-rate loop pacing, the same contract as PROS `Task::delay_until`.
///
/// Each [`Periodic::tick`] waits until one period after the previous deadline.
/// When an iteration overruns its deadline the schedule restarts from the
/// current time instead of running the missed iterations back to back.
pub struct Periodic<T: Timer> {
	timer: T,
	period: Duration,
	deadline: Duration,
}

impl<T: Timer> Periodic<T> {
	pub fn new(timer: T, period: Duration) -> Self {
		let deadline = timer.now();
		Self {
			timer,
			period,
			deadline,
		}
	}

	pub fn period(&self) -> Duration {
		self.period
	}

	/// Deadline the next call to `tick` will wait for.
	#[cfg(test)]
	pub(crate) fn next_deadline(&self) -> Duration {
		self.deadline + self.period
	}

	pub async fn tick(&mut self) {
		let now = self.timer.now();
		let deadline = self.deadline + self.period;

		if now < deadline {
			self.timer.sleep(deadline - now).await;
			self.deadline = deadline;
		} else {
			log::trace!("loop overran its period by {:?}", now - deadline);
			// still yield so other tasks get a turn
			self.timer.sleep(Duration::ZERO).await;
			self.deadline = now;
		}
	}
}
