// SPDX-License-Identifier: MPL-2.0
//! Application shell: directory resolution and navigation targets.

pub mod paths;
pub mod routes;

pub use routes::Route;
