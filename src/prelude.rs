pub use crate::cli::{command, run_app};
pub use crate::domain::{
    Contact, ContactFields, ContactId, ContactProvider, Session, SessionSource, UserId,
    contact::{self, validate_name, validate_number},
};
pub use crate::errors::{AppError, ContactError};
pub use crate::storage::{
    self, BackendKind, ContactBackend, file::JsonFileBackend, memory::MemoryBackend,
    remote::RemoteBackend,
};
