// SPDX-License-Identifier: MPL-2.0
//! Scroll proximity driver.

use super::events::{PageEvent, PageEvents};
use super::subscription::{CallbackSlot, ScopedSubscription};
use crate::domain::session::{LookaheadMargin, ProximityDetector};
use tokio::sync::broadcast::error::RecvError;

/// Calls `on_near_end` each time the sentinel carried by viewport events
/// enters the viewport extended by `margin`.
///
/// The last geometry already published on `events` is checked first, so a
/// sentinel that is in range when observation starts fires at once.
/// Staying inside the extended viewport does not fire again; leaving and
/// re-entering does. Dropping or disposing the returned subscription stops
/// all callbacks.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn observe_scroll_proximity<F>(
    events: &PageEvents,
    margin: LookaheadMargin,
    on_near_end: F,
) -> ScopedSubscription
where
    F: FnMut() + Send + 'static,
{
    let mut rx = events.subscribe();
    let initial = events.last_viewport();
    let mut detector = ProximityDetector::new(margin);
    let slot = CallbackSlot::new(on_near_end);
    let fire = slot.clone();

    let task = tokio::spawn(async move {
        if let Some(geometry) = initial {
            if detector.update(&geometry) && !fire.fire() {
                return;
            }
        }
        loop {
            match rx.recv().await {
                Ok(PageEvent::Viewport(geometry)) => {
                    if detector.update(&geometry) && !fire.fire() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("Scroll observer lagged by {skipped} events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    ScopedSubscription::new(task, slot.releaser())
}
