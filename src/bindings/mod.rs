//! Player name bindings of chat users.
//!
//! A user binds a TruckersMP player name once and can then query without typing it.
//!
//! - [`Binding`]: The player name bound to one user
//! - [`BindingStore`]: Owns every binding, serializes mutations and persists them
//! - [`BindingLoader`]: Loads and saves the bindings document
//!
//! # Example Usage
//!
//! ```no_run
//! use convoy::bindings::BindingStore;
//!
//! # async fn example() {
//! let store = BindingStore::load("bindings").await;
//! store.bind("@user:example.com", "Alice").await;
//! store.unbind("@user:example.com").await;
//! # }
//! ```

mod binding;
mod binding_loader;
mod binding_store;

pub use crate::bindings::binding::Binding;
pub use crate::bindings::binding_loader::BindingLoader;
pub use crate::bindings::binding_store::BindingStore;
