// SPDX-License-Identifier: MPL-2.0
//! Inactivity guard driver.
//!
//! Runs the [`InactivityTimer`] state machine in a tokio task, fed by the
//! page event bus and a single sleep on the pending deadline.

use super::events::{PageEvent, PageEvents};
use super::subscription::{CallbackSlot, ScopedSubscription};
use crate::application::lock;
use crate::domain::session::{InactivityTimeout, InactivityTimer, Transition, Visibility};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;

fn now() -> std::time::Instant {
    Instant::now().into_std()
}

/// Starts watching for inactivity.
///
/// `on_expire` runs exactly once, when `timeout` elapses without
/// interaction or when the page becomes hidden. Events after expiry are
/// ignored. If the listener falls behind the bus, the skipped events count
/// as activity unless the page is hidden by then. Dropping or disposing the returned subscription cancels the
/// timer and the listener.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn start_inactivity_guard<F>(
    events: &PageEvents,
    timeout: InactivityTimeout,
    on_expire: F,
) -> ScopedSubscription
where
    F: FnOnce() + Send + 'static,
{
    let mut rx = events.subscribe();
    let latest = events.latest();
    let mut timer = InactivityTimer::start(timeout.as_duration(), now());
    let slot = CallbackSlot::new(on_expire);
    let fire = slot.clone();

    let task = tokio::spawn(async move {
        while let Some(deadline) = timer.deadline() {
            let transition = tokio::select! {
                () = tokio::time::sleep_until(Instant::from_std(deadline)) => timer.poll(now()),
                event = rx.recv() => match event {
                    Ok(PageEvent::Interaction(_)) => timer.record_interaction(now()),
                    Ok(PageEvent::Visibility(visibility)) => {
                        timer.visibility_changed(visibility, now())
                    }
                    Ok(PageEvent::Viewport(_) | PageEvent::Press(_) | PageEvent::Release) => {
                        Transition::Unchanged
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        log::debug!("Inactivity guard lagged by {skipped} events");
                        let visibility = lock(&latest).visibility;
                        match visibility {
                            Visibility::Hidden => timer.visibility_changed(visibility, now()),
                            Visibility::Visible => timer.record_interaction(now()),
                        }
                    }
                    Err(RecvError::Closed) => break,
                },
            };

            if transition == Transition::Expired {
                log::info!("Session expired after inactivity");
                fire.fire_once();
            }
        }
    });

    ScopedSubscription::new(task, slot.releaser())
}
