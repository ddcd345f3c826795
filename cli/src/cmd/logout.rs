use codeiv_core::action;

use super::SubcmdResult;
use crate::context::AppContext;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub async fn exec(_args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    action::logout(&mut ctx.auth).await?;
    println!("Successfully logged out");
    Ok(())
}
