pub mod credential;
pub mod file_store;
mod lock;

pub use credential::CredentialRecord;
pub use file_store::{CredentialMap, FileCredentialStore};
