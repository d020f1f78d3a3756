//! Notification policy and delivery.
//!
//! The policy engine decides *whether* a session transition is notify-worthy
//! and builds the payload; channel implementations deliver it. OS-level
//! rendering is the shell's job — the desktop channel only relays.

pub mod channels;
pub mod policy;
pub mod sign;

pub use channels::{DesktopRelay, Dispatcher, Notify, PreviewNotifier, WebhookNotifier};
pub use policy::{Decision, Payload, PolicyEngine};
