//! Structured command input: an `--input` scenario file, else JSON piped on
//! stdin. Neither present means the command builds its input from flags.

use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

type InputResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Deserialise the command's input, or `None` when it should come from flags.
pub fn read_structured<T: DeserializeOwned>(path: Option<&str>) -> InputResult<Option<T>> {
    let (origin, text) = match path {
        Some(path) => {
            let file = scenario_file(path)?;
            let text = fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read '{}': {e}", file.display()))?;
            (file.display().to_string(), text)
        }
        None => match piped_stdin()? {
            Some(text) => ("stdin".to_string(), text),
            None => return Ok(None),
        },
    };

    tracing::debug!(%origin, bytes = text.len(), "parsing structured input");
    let parsed = serde_json::from_str(text.trim())
        .map_err(|e| format!("Failed to parse {origin}: {e}"))?;
    Ok(Some(parsed))
}

/// Absolute path of an existing regular file.
fn scenario_file(path: &str) -> InputResult<PathBuf> {
    let file = std::env::current_dir()?.join(path);
    match fs::metadata(&file) {
        Ok(meta) if meta.is_file() => Ok(file),
        Ok(_) => Err(format!("Not a file: {}", file.display()).into()),
        Err(_) => Err(format!("File not found: {}", file.display()).into()),
    }
}

/// Piped stdin text; an interactive terminal or blank input gives `None`.
fn piped_stdin() -> io::Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarvasva_core::emi::LoanParameters;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sarvasva-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_scenario_file() {
        let path = scratch_file(
            "loan.json",
            r#"{"principal": "100000", "annual_rate_percent": "10.99", "tenure_months": 24}"#,
        );
        let params: LoanParameters = read_structured(path.to_str()).unwrap().unwrap();
        assert_eq!(params.tenure_months, 24);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = scenario_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_directory_is_not_a_scenario() {
        let dir = std::env::temp_dir();
        let err = scenario_file(dir.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Not a file"));
    }

    #[test]
    fn test_malformed_file_names_its_origin() {
        let path = scratch_file("broken.json", "{ not json");
        let err = read_structured::<LoanParameters>(path.to_str()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        fs::remove_file(path).unwrap();
    }
}
