pub mod service;
pub mod session;
pub mod storage;

pub use session::{Role, Session, SessionHandle};
