pub mod contact;
pub mod provider;
pub mod session;

pub use contact::{Contact, ContactFields, ContactId, UserId};
pub use provider::ContactProvider;
pub use session::{Session, SessionSource};
