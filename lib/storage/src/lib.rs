pub mod case_file;
pub mod codec;
pub mod session;
pub mod store;

pub use case_file::CaseFile;
pub use codec::{RecordCodec, DEFAULT_DELIMITER};
pub use session::{CaseSession, RefreshPolicy, SessionOptions};
pub use store::{CaseStore, MemoryCaseStore};
