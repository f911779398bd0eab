mod config_gen;
mod convert;

pub use config_gen::config_generate;
pub use convert::{convert_file, default_output_path};
