// SPDX-License-Identifier: MPL-2.0
//! Long-press driver.
//!
//! Runs the [`LongPress`] detector against press and release events, with
//! a single sleep on the pending threshold.

use super::events::{PageEvent, PageEvents};
use super::subscription::{CallbackSlot, ScopedSubscription};
use crate::domain::session::{LongPress, LongPressThreshold, Visibility};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;

fn now() -> std::time::Instant {
    Instant::now().into_std()
}

async fn sleep_until(at: Option<std::time::Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

/// Calls `on_long_press` with the pressed item's index once a press has
/// been held for `threshold`.
///
/// A press fires at most once. Releasing earlier, hiding the page or
/// falling behind the bus cancels it. Dropping or disposing the returned
/// subscription stops all callbacks.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn watch_long_press<F>(
    events: &PageEvents,
    threshold: LongPressThreshold,
    on_long_press: F,
) -> ScopedSubscription
where
    F: FnMut(usize) + Send + 'static,
{
    let mut rx = events.subscribe();
    let mut detector = LongPress::new(threshold);
    let slot = CallbackSlot::new(on_long_press);
    let fire = slot.clone();

    let task = tokio::spawn(async move {
        let mut pressed: Option<usize> = None;
        loop {
            tokio::select! {
                () = sleep_until(detector.fires_at()) => {
                    if !detector.poll(now()) {
                        continue;
                    }
                    let Some(index) = pressed else { continue };
                    log::debug!("Long press on item {index}");
                    if !fire.with(|callback| callback(index)) {
                        break;
                    }
                }
                event = rx.recv() => match event {
                    Ok(PageEvent::Press(index)) => {
                        pressed = Some(index);
                        detector.press(now());
                    }
                    Ok(PageEvent::Release | PageEvent::Visibility(Visibility::Hidden)) => {
                        pressed = None;
                        detector.release(now());
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        log::debug!("Long-press driver lagged by {skipped} events");
                        pressed = None;
                        detector.release(now());
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    });

    ScopedSubscription::new(task, slot.releaser())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl FnMut(usize) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner = Arc::clone(&seen);
        (seen, move |index| inner.lock().unwrap().push(index))
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn held_press_fires_once_with_index() {
        let events = PageEvents::new();
        let (seen, on_long_press) = recorder();
        let _driver = watch_long_press(&events, LongPressThreshold::new(600), on_long_press);

        events.pressed(4);
        advance(599).await;
        assert!(seen.lock().unwrap().is_empty());
        advance(2).await;
        assert_eq!(*seen.lock().unwrap(), vec![4]);

        advance(2_000).await;
        events.released();
        advance(10).await;
        assert_eq!(*seen.lock().unwrap(), vec![4]);
    }

    #[tokio::test(start_paused = true)]
    async fn early_release_cancels() {
        let events = PageEvents::new();
        let (seen, on_long_press) = recorder();
        let _driver = watch_long_press(&events, LongPressThreshold::new(600), on_long_press);

        events.pressed(1);
        advance(300).await;
        events.released();
        advance(1_000).await;
        assert!(seen.lock().unwrap().is_empty());

        events.pressed(2);
        advance(700).await;
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn hiding_the_page_cancels_press() {
        let events = PageEvents::new();
        let (seen, on_long_press) = recorder();
        let _driver = watch_long_press(&events, LongPressThreshold::new(600), on_long_press);

        events.pressed(0);
        advance(100).await;
        events.set_visibility(Visibility::Hidden);
        advance(1_000).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn disposed_driver_stops_firing() {
        let events = PageEvents::new();
        let (seen, on_long_press) = recorder();
        let mut driver = watch_long_press(&events, LongPressThreshold::new(600), on_long_press);

        events.pressed(0);
        advance(100).await;
        driver.dispose();
        advance(1_000).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
