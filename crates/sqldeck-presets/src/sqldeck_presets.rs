//! sqldeck presets - named connection profiles from the user's config
//!
//! Presets live in a JSON file in the user's home directory and are
//! loaded once at startup; the list is immutable for the process
//! lifetime.

mod store;

pub use store::{RC_FILE_NAME, get_preset_by_name, load_presets, load_presets_from, rc_file_path};
