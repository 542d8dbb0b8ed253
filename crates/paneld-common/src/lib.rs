pub mod errors;
pub mod types;

pub use errors::{ConfigError, PaneldError, ProcessError};
pub use types::{PanelRole, UnknownPanelRole};

pub type Result<T> = std::result::Result<T, PaneldError>;
