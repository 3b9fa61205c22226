//! Live Reload Client
//!
//! Connects to a development server over WebSocket and reloads the page or
//! swaps its stylesheets when told to.
//!
//! # Modules
//!
//! - `client` - Connection thread, dispatcher task and `install_hmr`
//! - `css` - Stylesheet cache busting
//! - `debounce` - Visibility restore timer (last message wins)
//! - `message` - Server frames (`reload`, `refreshcss`)
//! - `page` - The `Page` trait and an in-memory `HeadlessPage`

pub mod client;
pub mod css;
pub mod debounce;
pub mod message;
pub mod page;

pub use client::{ReloadCallback, ReloadDispatcher, ReloadHandle, ReloadOptions, ReloadState, install_hmr};
pub use message::ReloadMessage;
pub use page::{HeadlessPage, LinkElement, Page};
