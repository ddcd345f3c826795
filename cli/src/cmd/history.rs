use anyhow::{anyhow, Context as _};
use codeiv_core::{action, auth::Requirement, interactive, style};

use super::SubcmdResult;
use crate::context::AppContext;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Show the code and feedback of one session
    #[arg(long)]
    pub id: Option<String>,
}

pub async fn exec(args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::SignedIn)?;
    let uid = ctx
        .auth
        .current_user()
        .map(|u| u.uid)
        .context("Not logged in")?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let spinner = interactive::spinner("Loading your sessions...");
    let loaded = action::load_history(&api, &uid).await;
    spinner.finish_and_clear();

    if let Some(notice) = &loaded.notice {
        style::print_notice(notice);
    }

    if let Some(id) = &args.id {
        let session = loaded
            .data
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| anyhow!("No session with id {}", id))?;
        style::print_session_detail(session, &ctx.theme);
        return Ok(());
    }

    if loaded.data.is_empty() {
        println!("No sessions found. Start your first coding interview!");
        return Ok(());
    }
    println!("Session History\n");
    for s in &loaded.data {
        style::print_session_row(s, &ctx.theme);
    }
    Ok(())
}
