//! Account and session models held by the client.

pub mod secret;
pub mod session;
pub mod user;

pub use secret::*;
pub use session::*;
pub use user::*;
