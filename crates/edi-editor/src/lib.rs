//! # edi-editor — Editor core for edi
//!
//! Terminal-independent editor state and frame composition:
//!
//! - **[`cursor`]** — on-screen cursor with movement clamped to the window
//! - **[`config`]** — session configuration (banner, margin marker, quit key)
//! - **[`view`]** — composes a full frame into an edi-term `OutputBuffer`
//!
//! Nothing here reads from or writes to the terminal directly. The binary
//! hands frames to edi-term's event loop, which owns the device.

pub mod config;
pub mod cursor;
pub mod view;
