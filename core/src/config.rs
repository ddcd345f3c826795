use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::{ensure, Context as _};
use codeiv_webclient::{firebase::FirebaseSettings, Url};
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::storage::util;

pub const APP_NAME: &str = "codeiv";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub api: ApiConfig,
    pub interview: InterviewConfig,
    pub firebase: FirebaseSettings,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterviewConfig {
    pub duration_minutes: u32,
    pub workspace_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    pub dark: bool,
}

/// `CODEIV_*` environment variables. Each one present wins over the file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvOverrides {
    pub api_url: Option<Url>,
    pub api_timeout_secs: Option<u64>,
    pub duration_minutes: Option<u32>,
    pub workspace_dir: Option<PathBuf>,
    pub firebase_api_key: Option<String>,
    pub firebase_project_id: Option<String>,
    pub dark_theme: Option<bool>,
}

impl EnvOverrides {
    pub const PREFIX: &str = "CODEIV_";

    pub fn from_env() -> anyhow::Result<Self> {
        envy::prefixed(Self::PREFIX)
            .from_env::<Self>()
            .context("Invalid CODEIV_* environment variable")
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "codeiv.toml";

    pub fn default_toml() -> String {
        let file = Asset::get(Self::FILENAME).expect("codeiv.toml is embedded at build time");
        String::from_utf8_lossy(file.data.as_ref()).into_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = util::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// `<config dir>/codeiv/codeiv.toml`
    pub fn default_filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(Self::FILENAME))
    }

    /// Reads `path`, else the default file if it exists, else the embedded defaults;
    /// then applies environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => Some(p.to_owned()),
            None => Self::default_filepath().filter(|p| p.is_file()),
        };
        let cfg = match file {
            Some(p) => Self::from_toml_file(p)?,
            None => Self::from_toml(&Self::default_toml()).context("Invalid embedded config")?,
        };
        let cfg = cfg.with_overrides(EnvOverrides::from_env()?);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values that would make every interview or request fail.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.interview.duration_minutes >= 1,
            "interview.duration_minutes must be at least 1"
        );
        ensure!(self.api.timeout_secs >= 1, "api.timeout_secs must be at least 1");
        Ok(())
    }

    pub fn with_overrides(mut self, env: EnvOverrides) -> Self {
        let EnvOverrides {
            api_url,
            api_timeout_secs,
            duration_minutes,
            workspace_dir,
            firebase_api_key,
            firebase_project_id,
            dark_theme,
        } = env;

        if let Some(v) = api_url {
            self.api.base_url = v;
        }
        if let Some(v) = api_timeout_secs {
            self.api.timeout_secs = v;
        }
        if let Some(v) = duration_minutes {
            self.interview.duration_minutes = v;
        }
        if let Some(v) = workspace_dir {
            self.interview.workspace_dir = v;
        }
        if let Some(v) = firebase_api_key {
            self.firebase.api_key = v;
        }
        if let Some(v) = firebase_project_id {
            self.firebase.project_id = v;
        }
        if let Some(v) = dark_theme {
            self.theme.dark = v;
        }
        self
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_toml_should_be_parsable() {
        let toml = Config::default_toml();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        let Config {
            source_config_file,
            api,
            interview,
            firebase,
            theme,
        } = cfg;

        assert_eq!(source_config_file, None);
        assert_eq!(api.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(api.timeout(), Duration::from_secs(30));
        assert_eq!(interview.duration_minutes, 45);
        assert_eq!(interview.workspace_dir, Path::new("./codeiv-workspace"));
        assert_eq!(firebase.api_key, "");
        assert_eq!(firebase.project_id, "");
        assert!(!theme.dark);
    }

    #[test]
    fn env_overrides_win() {
        let vars = vec![
            ("CODEIV_API_URL".to_owned(), "https://api.example.com/v1/".to_owned()),
            ("CODEIV_DURATION_MINUTES".to_owned(), "30".to_owned()),
            ("CODEIV_FIREBASE_PROJECT_ID".to_owned(), "codeiv-prod".to_owned()),
            ("CODEIV_DARK_THEME".to_owned(), "true".to_owned()),
            ("HOME".to_owned(), "/home/alice".to_owned()),
        ];
        let env = envy::prefixed(EnvOverrides::PREFIX)
            .from_iter::<_, EnvOverrides>(vars)
            .unwrap();
        assert_eq!(env.api_timeout_secs, None);

        let cfg = Config::from_toml(&Config::default_toml())
            .unwrap()
            .with_overrides(env);
        assert_eq!(cfg.api.base_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.interview.duration_minutes, 30);
        assert_eq!(cfg.firebase.project_id, "codeiv-prod");
        assert!(cfg.theme.dark);
    }

    #[test]
    fn zero_duration_or_timeout_is_rejected() {
        let cfg = Config::from_toml(&Config::default_toml()).unwrap();
        assert!(cfg.validate().is_ok());

        let zero_minutes = EnvOverrides {
            duration_minutes: Some(0),
            ..Default::default()
        };
        let err = cfg.clone().with_overrides(zero_minutes).validate().unwrap_err();
        assert!(err.to_string().contains("duration_minutes"), "{}", err);

        let zero_timeout = Config::from_toml(
            &Config::default_toml().replace("timeout_secs = 30", "timeout_secs = 0"),
        )
        .unwrap();
        let err = zero_timeout.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"), "{}", err);
    }

    #[test]
    fn missing_section_is_an_error() {
        assert!(Config::from_toml("[api]\nbase_url = \"http://localhost:5000\"\ntimeout_secs = 3\n").is_err());
    }
}
