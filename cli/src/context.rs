use anyhow::Context as _;
use codeiv_core::{action, auth::AuthSession, Config, ThemeSettings};

use crate::{cmd::GlobalArgs, util};

/// Everything a subcommand needs, built once from the global arguments.
pub struct AppContext {
    pub cfg: Config,
    pub theme: ThemeSettings,
    pub auth: AuthSession,
}

impl AppContext {
    pub fn new(args: &GlobalArgs) -> anyhow::Result<Self> {
        let GlobalArgs {
            subcmd: _,
            cache_dir,
            config,
            theme,
        } = args;

        let cfg = Config::load(config.as_deref()).context("Failed to load config")?;
        if let Some(path) = &cfg.source_config_file {
            log::debug!("Config: {:?}", util::replace_homedir_to_tilde(path));
        }

        let theme = match theme {
            Some(t) => ThemeSettings { dark: t.is_dark() },
            None => cfg.theme.into(),
        };

        let cache_dir = match cache_dir {
            Some(d) => d.clone(),
            None => util::default_cache_dir()?,
        };
        let authenticator = action::new_authenticator(&cfg.firebase, &cfg.api)?;
        let auth = AuthSession::new(authenticator, cache_dir);

        Ok(Self { cfg, theme, auth })
    }
}
