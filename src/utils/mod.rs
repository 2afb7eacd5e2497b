pub mod environment;
pub mod paths;
pub mod terminal;
pub mod timestamps;

pub use environment::Environment;
pub use paths::{format_path_with_tilde, normalize_path, shorten_path};
pub use terminal::{preview, strip_ansi_codes};
pub use timestamps::{format_file_date, format_listing_date, parse_timestamp};
