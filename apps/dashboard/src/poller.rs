//! Background notification check on a fixed interval.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const POLL_INTERVAL: Duration = Duration::from_millis(30_000);

pub trait NotificationCheck: Send + 'static {
    fn check(&mut self);
}

impl<T: NotificationCheck + ?Sized> NotificationCheck for Box<T> {
    fn check(&mut self) {
        (**self).check();
    }
}

/// There is no notification backend; each check is only logged.
#[derive(Debug, Default)]
pub struct LoggingNotificationCheck;

impl NotificationCheck for LoggingNotificationCheck {
    fn check(&mut self) {
        tracing::debug!("checking for new notifications");
    }
}

/// Starts the poller. The first check runs one full `period` after the call and the
/// task is never cancelled.
pub fn spawn_poller(period: Duration, mut hook: impl NotificationCheck) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            hook.check();
        }
    })
}
