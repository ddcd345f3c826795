use codeiv_core::{action, print_success, style};

use super::SubcmdResult;
use crate::context::AppContext;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Sign in with a Google ID token instead of email and password
    #[arg(long, value_name = "ID_TOKEN")]
    pub google: Option<String>,
}

pub async fn exec(args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    match &args.google {
        Some(token) => action::login_with_google(&mut ctx.auth, token).await?,
        None => action::login(&mut ctx.auth).await?,
    }

    print_success!("Successfully logged in");
    if let Some(profile) = ctx.auth.current_profile() {
        style::print_profile(profile);
    }
    Ok(())
}
