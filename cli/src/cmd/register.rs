use codeiv_core::{action, print_success};

use super::SubcmdResult;
use crate::context::AppContext;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub async fn exec(_args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    action::register(&mut ctx.auth).await?;

    let name = ctx
        .auth
        .current_profile()
        .map(|p| p.display_name.clone())
        .unwrap_or_default();
    print_success!("Welcome, {}! Your account has been created", name);
    Ok(())
}
