use std::path::{Path, PathBuf};

use codeiv_core::config::APP_NAME;
use codeiv_webclient::TestCase;

pub fn default_cache_dir() -> anyhow::Result<PathBuf> {
    let dir = dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Failed to get user's cache dir path"))?;
    Ok(dir.join(APP_NAME))
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// `"[2,7,11,15], 9 => [0,1]"`
pub fn parse_test_case(s: &str) -> Result<TestCase, String> {
    let (input, expected) = s
        .split_once("=>")
        .ok_or_else(|| format!("expected '<input> => <output>', got '{}'", s))?;
    Ok(TestCase {
        input: input.trim().to_owned(),
        expected_output: expected.trim().to_owned(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_case_arg() {
        let t = parse_test_case("[2,7,11,15], 9 => [0,1]").unwrap();
        assert_eq!(t.input, "[2,7,11,15], 9");
        assert_eq!(t.expected_output, "[0,1]");
        assert!(parse_test_case("no arrow").is_err());
    }

    #[test]
    fn tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                replace_homedir_to_tilde(home.join(".cache/codeiv")),
                Path::new("~/.cache/codeiv")
            );
        }
        assert_eq!(replace_homedir_to_tilde("/tmp/x"), Path::new("/tmp/x"));
    }
}
