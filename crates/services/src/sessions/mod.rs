mod controller;
mod events;

// Public API of the session subsystem.
pub use controller::{SessionController, SessionHandle};
pub use events::SessionEvent;
