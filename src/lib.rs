//! tellerkit — embedded banking widget runtime.
//!
//! The widget's headless core: localized strings fetched from a backend
//! endpoint (every call bounded by a hard timeout), and a relay that
//! forwards messages from the embedding host onto an internal topic bus.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`net`] | Bounded fetch: one HTTP attempt raced against a deadline |
//! | [`locale`] | Locale table with wholesale replacement and fixed fallbacks |
//! | [`bus`] | Topic-keyed broadcast bus |
//! | [`relay`] | Host message → bus forwarding |
//! | [`host`] | Host message shape, queue, stdin transport |
//! | [`text`] | Positional template formatting |
//! | [`model`] | Backend wire types (accounts, transactions) |
//! | [`runtime`] | Component spawning and cooperative shutdown |
//!
//! Embedders construct the pieces themselves (see `main.rs` for the
//! standalone wiring): build a [`locale::LocaleStore`], an
//! [`bus::EventBus`] and a host queue, then feed [`host::HostMessage`]s
//! through the sender half of [`host::host_pair`].

pub mod bus;
pub mod config;
pub mod error;
pub mod host;
pub mod locale;
pub mod logger;
pub mod model;
pub mod net;
pub mod relay;
pub mod runtime;
pub mod text;

pub use bus::EventBus;
pub use error::AppError;
pub use host::HostMessage;
pub use locale::LocaleStore;
pub use net::{FetchError, RequestOptions, fetch_bounded};
pub use text::format_template;
