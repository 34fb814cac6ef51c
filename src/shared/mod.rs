pub mod errors;
pub mod logging;

pub use errors::PageLoadError;
pub use logging::{append_client_log_line, ClientLog};
