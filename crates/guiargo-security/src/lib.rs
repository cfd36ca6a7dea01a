//! # Guiargo Security
//! 
//! Security utilities: password hashing and signed session tokens.

pub mod password;
pub mod session;

pub use password::{PasswordError, PasswordService};
pub use session::{SessionClaims, SessionError, SessionIdentity, SessionService};
