use codeiv_core::{action, auth::Requirement};

use super::SubcmdResult;
use crate::context::AppContext;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub async fn exec(_args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::Admin)?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let stats = action::fetch_user_stats(&api).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
