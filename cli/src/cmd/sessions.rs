use codeiv_core::{action, auth::Requirement, interactive, style};

use super::SubcmdResult;
use crate::context::AppContext;

/// Every candidate's sessions. Admin only.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Only sessions of this user
    #[arg(long)]
    pub user: Option<String>,
}

pub async fn exec(args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::Admin)?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let spinner = interactive::spinner("Loading sessions...");
    let sessions = action::fetch_all_sessions(&api).await;
    spinner.finish_and_clear();

    let sessions: Vec<_> = sessions?
        .into_iter()
        .filter(|s| args.user.as_ref().map_or(true, |u| &s.user_id == u))
        .collect();

    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }
    for s in &sessions {
        print!("{:<14} ", s.user_id);
        style::print_session_row(s, &ctx.theme);
    }
    Ok(())
}
