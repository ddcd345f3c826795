use colored::Colorize as _;
use codeiv_core::style;

use super::SubcmdResult;
use crate::context::AppContext;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: &Args, ctx: &AppContext) -> SubcmdResult {
    match (ctx.auth.current_profile(), ctx.auth.current_user()) {
        (Some(profile), _) => style::print_profile(profile),
        (None, Some(user)) => println!(
            "{} {}",
            user.email.as_deref().unwrap_or(&user.uid).bold(),
            "(no profile)".bright_black()
        ),
        (None, None) => println!("Not logged in"),
    }
    Ok(())
}
