//! UI window/session state for the platform client.
//!
//! [`UiWindowStateStore`] tracks what is currently displayed (resource, tab,
//! main and sub panes, layout) and which pop-out talk/meeting windows are
//! open. It is a plain value: construct one per client (or per test) and pass
//! it where it is needed. Observers subscribe with
//! [`UiWindowStateStore::subscribe`] and receive one
//! [`StateChange`](teeplatform_bridge::change::StateChange) per effective
//! mutation.
//!
//! Window handles are never owned by the store. They implement
//! [`WindowHandle`] and are only asked whether they are alive and to focus.

mod observer;
mod registry;
pub mod route;
mod store;

pub use crate::observer::SubscriptionId;
pub use crate::route::{Route, RouteError};
pub use crate::store::UiWindowStateStore;
pub use teeplatform_bridge::change::AppInputs;
pub use teeplatform_bridge::window::{WindowHandle, WindowInfo};
