pub mod history;
pub mod interview;
pub mod login;
pub mod logout;
pub mod questions;
pub mod register;
pub mod sessions;
pub mod stats;
pub mod whoami;

use std::path::PathBuf;

use crate::context::AppContext;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Where the sign-in token is kept
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Config file to use instead of the one in the user's config dir
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub theme: Option<ArgTheme>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Login(login::Args),
    Register(register::Args),
    Logout(logout::Args),
    Whoami(whoami::Args),

    #[command(alias("q"))]
    Questions(questions::Args),

    #[command(alias("i"))]
    Interview(interview::Args),

    History(history::Args),
    Sessions(sessions::Args),
    Stats(stats::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        let mut ctx = AppContext::new(self)?;

        use Subcommand::*;
        match &self.subcmd {
            Login(args) => login::exec(args, &mut ctx).await,
            Register(args) => register::exec(args, &mut ctx).await,
            Logout(args) => logout::exec(args, &mut ctx).await,
            Whoami(args) => whoami::exec(args, &ctx),
            Questions(args) => questions::exec(args, &mut ctx).await,
            Interview(args) => interview::exec(args, &mut ctx).await,
            History(args) => history::exec(args, &mut ctx).await,
            Sessions(args) => sessions::exec(args, &mut ctx).await,
            Stats(args) => stats::exec(args, &mut ctx).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgTheme {
    Dark,
    Light,
}

impl ArgTheme {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::{CommandFactory as _, Parser as _};

    #[test]
    fn cli_definition_is_valid() {
        GlobalArgs::command().debug_assert();
    }

    #[test]
    fn parse_interview() {
        let args = GlobalArgs::try_parse_from([
            "codeiv", "--theme", "dark", "interview", "1", "--minutes", "30", "-l", "cpp",
        ])
        .unwrap();
        assert_eq!(args.theme, Some(ArgTheme::Dark));
        let Subcommand::Interview(i) = args.subcmd else {
            panic!("not an interview: {:?}", args.subcmd)
        };
        assert_eq!(i.question_id, "1");
        assert_eq!(i.minutes, Some(30));
        assert_eq!(i.language.as_deref(), Some("cpp"));
    }

    #[test]
    fn zero_minutes_is_rejected_by_the_parser() {
        assert!(GlobalArgs::try_parse_from(["codeiv", "interview", "1", "--minutes", "0"]).is_err());
    }

    #[test]
    fn parse_question_create() {
        let args = GlobalArgs::try_parse_from([
            "codeiv",
            "questions",
            "create",
            "--title",
            "Two Sum",
            "--description",
            "Find two numbers",
            "--difficulty",
            "easy",
            "-l",
            "python",
            "-l",
            "cpp",
            "--test-case",
            "[3,2,4], 6 => [1,2]",
        ])
        .unwrap();
        let Subcommand::Questions(q) = args.subcmd else {
            panic!("not questions")
        };
        let Some(questions::Action::Create(c)) = q.action else {
            panic!("not create")
        };
        assert_eq!(c.languages, vec!["python", "cpp"]);
        assert_eq!(c.test_cases[0].expected_output, "[1,2]");
    }
}
