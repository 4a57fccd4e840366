//! Command implementations

pub mod anonymize;
pub mod detect;
pub mod init;
pub mod status;
pub mod validate;

use crate::domain::result::Result;
use std::io::Read;
use std::path::Path;

/// Resolve input text from an argument, a file, or stdin (in that order)
pub(crate) fn read_input(text: Option<&str>, input: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    if let Some(path) = input {
        return std::fs::read_to_string(path).map_err(|e| {
            crate::domain::AegisError::Io(format!("Failed to read {}: {}", path.display(), e))
        });
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| crate::domain::AegisError::Io(format!("Failed to read stdin: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_prefers_argument() {
        let result = read_input(Some("direct"), None).unwrap();
        assert_eq!(result, "direct");
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from file").unwrap();
        let result = read_input(None, Some(file.path())).unwrap();
        assert_eq!(result, "from file");
    }

    #[test]
    fn test_read_input_missing_file() {
        let result = read_input(None, Some(Path::new("/no/such/file")));
        assert!(result.is_err());
    }
}
