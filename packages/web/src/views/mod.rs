mod board;
pub use board::Notes;

mod login;
pub use login::{Login, Register};
