mod commands;
mod output;

pub use commands::{Cli, ColorModeArg, OutputFormat};
pub use output::{format_counts, format_json, format_list, format_tree};
