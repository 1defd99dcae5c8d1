//! Authentication state and lifecycle for the whole client process.
//! Keep the public surface thin and split implementation across sub-modules.

mod context;
mod state;

pub use context::{AuthContext, LoginOutcome};
pub use state::AuthState;
