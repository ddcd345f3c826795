use std::io;
use std::time::Duration;

use codeiv_webclient::{CredFieldKind, CredFieldMeta, CredMap};
use indicatif::{ProgressBar, ProgressStyle};

pub mod util {
    use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
    use std::io;

    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn ask_text(prompt: &str) -> io::Result<String> {
        Input::with_theme(&theme())
            .with_prompt(prompt)
            .interact_text()
    }

    pub fn ask_password(prompt: &str) -> io::Result<String> {
        Password::with_theme(&theme())
            .with_prompt(prompt)
            .interact()
    }

    pub fn confirm(prompt: &str) -> io::Result<bool> {
        Confirm::with_theme(&theme())
            .with_prompt(prompt)
            .default(false)
            .interact()
    }
}

pub fn ask_credential(fields: &[CredFieldMeta]) -> io::Result<CredMap> {
    let mut map = CredMap::new();

    for CredFieldMeta { name, kind } in fields {
        use CredFieldKind::*;

        let value = match kind {
            Text => util::ask_text(name),
            Password => util::ask_password(name),
        }?;

        map.insert(*name, value);
    }
    Ok(map)
}

/// Spinner that ticks on its own until finished.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let bar = ProgressBar::new_spinner()
        .with_style(style)
        .with_message(msg.into());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
