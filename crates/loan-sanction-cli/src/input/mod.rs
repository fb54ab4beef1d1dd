pub mod file;
pub mod stdin;

use serde_json::Value;

/// JSON from `--input <file>` when given, otherwise from piped stdin.
/// `None` means the command should fall back to its flags.
pub fn read_json_input(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(file::read_json_value(path)?)),
        None => stdin::read_stdin(),
    }
}
