// SPDX-License-Identifier: MPL-2.0
//! Session store adapters.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
