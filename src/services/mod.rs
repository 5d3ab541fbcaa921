//! Business logic services for the chirp backend

mod account;
mod post;
mod session;

pub use account::{AccountError, AccountService};
pub use post::{PostError, PostService};
pub use session::{SessionError, SessionService, TokenPair};
