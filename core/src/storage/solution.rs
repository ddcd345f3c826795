use std::path::{Path, PathBuf};

use codeiv_webclient::QuestionId;

use super::{error::*, util};
use crate::interview::starter;

/// Directory name for a question inside the workspace. Anything but ASCII
/// alphanumerics, `-` and `_` becomes `_`, so an id never leaves the workspace.
fn dir_name(id: &QuestionId) -> String {
    let name: String = id
        .as_str()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if name.is_empty() {
        "_".to_owned()
    } else {
        name
    }
}

/// The editor buffer of an interview: `<workspace>/<question id>/solution.<ext>`.
/// Each language has its own file; a language switch rewrites it with the starter code.
#[derive(Debug, Clone)]
pub struct SolutionFile {
    dir: PathBuf,
    language: String,
}

impl SolutionFile {
    pub fn new(workspace_dir: impl AsRef<Path>, question_id: &QuestionId, language: &str) -> Self {
        Self {
            dir: workspace_dir.as_ref().join(dir_name(question_id)),
            language: language.to_owned(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir
            .join(format!("solution.{}", starter::file_extension(&self.language)))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Points at the file of another language; nothing is written.
    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_owned();
    }

    #[must_use]
    pub fn write(&self, code: &str) -> Result<PathBuf> {
        let path = self.path();
        util::write_with_mkdir(&path, code)?;
        Ok(path)
    }

    #[must_use]
    pub fn read(&self) -> Result<String> {
        util::read_to_string(self.path())
    }
}
