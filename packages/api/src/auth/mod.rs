//! Authentication: password hashing, bearer tokens and the request extractor.

mod extract;
mod password;
mod token;

pub use extract::AuthUser;
pub use password::Passwords;
pub use token::TokenIssuer;
