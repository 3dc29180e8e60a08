// SPDX-License-Identifier: MPL-2.0
//! `event_lens` is the client side of an event-photography platform.
//!
//! Attendees log in, submit a selfie and browse face-matched results plus
//! the photo and video galleries of an event. Galleries are fetched once,
//! deduplicated by key and revealed page by page as the viewport nears the
//! end of the list; the browsing session ends after a period of inactivity
//! or when the page is hidden.

#![doc(html_root_url = "https://docs.rs/event_lens/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
