mod requests;
mod session;

pub use requests::CallbackParams;
pub use session::{Session, TokenPair};
