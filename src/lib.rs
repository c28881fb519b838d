//! # utopia-api
//!
//! Asynchronous client for the JSON-RPC API that the Utopia desktop application
//! exposes on `http://127.0.0.1:20000/api/1.0`, plus its optional notification
//! WebSocket.
//!
//! - Every request is an envelope `{token, method, params}` posted over HTTP.
//!   Requests from one [`Client`] are sent one at a time, in issue order, and
//!   are never retried.
//! - Remote methods are described by a declarative table ([`OPERATIONS`]) and
//!   invoked through [`Client::call`], which maps argument names to wire names
//!   and fills in documented defaults.
//! - With [`ClientOptions::notifications`] set, the client finds or enables the
//!   server's WebSocket port and delivers pushed events by [`Category`], either
//!   to callbacks ([`Client::on`], [`Client::once`]) or to pull-based
//!   [`Subscription`]s.
//!
//! ```no_run
//! use utopia_api::{Category, Client, ClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> utopia_api::Result<()> {
//!     let options = ClientOptions {
//!         notifications: true,
//!         ..ClientOptions::default()
//!     };
//!     let client = Client::new("0123456789ABCDEF", options).await?;
//!
//!     let contacts = client.call("get_contacts")?.send().await?;
//!     println!("{contacts}");
//!
//!     let mut messages = client.subscribe(Category::IncomingMessage);
//!     while let Ok(event) = messages.recv().await {
//!         println!("{}: {:?}", event.ty, event.payload);
//!     }
//!     Ok(())
//! }
//! ```

mod activation;
mod call;
mod category;
mod channel;
mod client;
mod credential;
mod dispatcher;
mod envelope;
mod error;
mod files;
mod operations;
mod options;
mod registry;
mod transport;

pub use call::*;
pub use category::*;
pub use channel::{ChannelState, NotificationChannel};
pub use client::*;
pub use credential::*;
pub use dispatcher::*;
pub use envelope::*;
pub use error::*;
pub use files::*;
pub use operations::*;
pub use options::*;
pub use registry::*;
pub use transport::*;
