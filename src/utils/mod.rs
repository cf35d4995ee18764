pub mod errors;
pub mod format;
pub mod page;
pub mod table;

pub use errors::{extract_clean_error, ConfigError, FetchError, ResolutionError};
pub use page::{FetchCommand, PageAction, PageState, Pager, Phase};
pub use table::Table;
