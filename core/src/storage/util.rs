use std::{fs, path::Path};

use super::error::*;

fn fail(action: ActionKind, path: &Path, e: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error {
        action,
        path: path.to_owned(),
        source: Box::new(e),
    }
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    let filepath = filepath.as_ref();
    if let Some(dir) = filepath.parent() {
        fs::create_dir_all(dir).map_err(|e| fail(ActionKind::CreateDir, dir, e))?;
    }
    fs::write(filepath, contents).map_err(|e| fail(ActionKind::WriteFile, filepath, e))
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    let filepath = filepath.as_ref();
    fs::read_to_string(filepath).map_err(|e| fail(ActionKind::ReadFile, filepath, e))
}

#[must_use]
pub fn remove_file(filepath: impl AsRef<Path>) -> Result<()> {
    let filepath = filepath.as_ref();
    fs::remove_file(filepath).map_err(|e| fail(ActionKind::RemoveFile, filepath, e))
}

#[must_use]
pub fn write_json_with_mkdir<T: serde::Serialize>(filepath: impl AsRef<Path>, data: &T) -> Result<()> {
    let filepath = filepath.as_ref();
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| fail(ActionKind::SerializeToJson, filepath, e))?;
    write_with_mkdir(filepath, json)
}

#[must_use]
pub fn read_json<T: serde::de::DeserializeOwned>(filepath: impl AsRef<Path>) -> Result<T> {
    let filepath = filepath.as_ref();
    let json = read_to_string(filepath)?;
    serde_json::from_str(&json).map_err(|e| fail(ActionKind::DeserializeFromJson, filepath, e))
}
