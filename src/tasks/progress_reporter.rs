//! Countdown progress logging task

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::{CountdownEvent, CountdownUpdate};

/// Log every countdown update until the publishing side goes away.
///
/// Returns the number of updates observed, excluding the initial value.
pub async fn progress_reporter_task(mut update_rx: watch::Receiver<CountdownUpdate>) -> usize {
    info!("Starting countdown progress reporter");

    let initial = update_rx.borrow_and_update().clone();
    report(&initial);

    let mut seen = 0;
    while update_rx.changed().await.is_ok() {
        let update = update_rx.borrow_and_update().clone();
        report(&update);
        seen += 1;
    }

    debug!("Countdown update channel closed, reporter exiting");
    seen
}

fn report(update: &CountdownUpdate) {
    let delta = &update.delta;
    match update.event {
        CountdownEvent::Created => info!(
            "Countdown ready: {}d {:02}:{:02}:{:02} remaining",
            delta.days(), delta.hours(), delta.minutes(), delta.seconds()
        ),
        CountdownEvent::Started => info!(
            "Countdown started: {}d {:02}:{:02}:{:02} remaining",
            delta.days(), delta.hours(), delta.minutes(), delta.seconds()
        ),
        CountdownEvent::Tick => debug!(
            "Countdown tick: {}d {:02}:{:02}:{:02}.{:03}",
            delta.days(), delta.hours(), delta.minutes(), delta.seconds(), delta.milliseconds()
        ),
        CountdownEvent::Completed => info!("Countdown completed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::TimeDelta;

    #[tokio::test]
    async fn counts_updates_until_sender_dropped() {
        let (tx, rx) = watch::channel(CountdownUpdate::new(CountdownEvent::Created, TimeDelta::from_total(3_000)));
        let reporter = tokio::spawn(progress_reporter_task(rx));
        tokio::task::yield_now().await;

        tx.send(CountdownUpdate::new(CountdownEvent::Started, TimeDelta::from_total(3_000))).unwrap();
        drop(tx);

        assert_eq!(reporter.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn exits_immediately_when_closed() {
        let (tx, rx) = watch::channel(CountdownUpdate::new(CountdownEvent::Created, TimeDelta::zero()));
        drop(tx);
        assert_eq!(progress_reporter_task(rx).await, 0);
    }
}
