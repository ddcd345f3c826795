use anyhow::ensure;
use codeiv_core::{action, auth::Requirement, interactive, print_success, style};
use codeiv_webclient::{Difficulty, NewQuestion, QuestionId, QuestionPatch, TestCase};

use super::SubcmdResult;
use crate::{context::AppContext, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Lists all questions when omitted
    #[command(subcommand)]
    pub action: Option<Action>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Action {
    List,
    Show(ShowArgs),
    Create(CreateArgs),
    Update(UpdateArgs),
    Delete(DeleteArgs),
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    pub question_id: String,
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub difficulty: Difficulty,

    #[arg(short = 'l', long = "language", required = true)]
    pub languages: Vec<String>,

    /// `<input> => <expected output>`, repeatable
    #[arg(long = "test-case", value_parser = util::parse_test_case)]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, clap::Args)]
pub struct UpdateArgs {
    pub question_id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Replaces the whole language list
    #[arg(short = 'l', long = "language")]
    pub languages: Vec<String>,

    /// Replaces all test cases
    #[arg(long = "test-case", value_parser = util::parse_test_case)]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, clap::Args)]
pub struct DeleteArgs {
    pub question_id: String,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn exec(args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    match &args.action {
        None | Some(Action::List) => list(ctx).await,
        Some(Action::Show(a)) => show(a, ctx).await,
        Some(Action::Create(a)) => create(a, ctx).await,
        Some(Action::Update(a)) => update(a, ctx).await,
        Some(Action::Delete(a)) => delete(a, ctx).await,
    }
}

async fn list(ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::SignedIn)?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let spinner = interactive::spinner("Loading questions...");
    let loaded = action::load_questions(&api).await;
    spinner.finish_and_clear();

    if let Some(notice) = &loaded.notice {
        style::print_notice(notice);
    }
    println!("Available Coding Sessions\n");
    for q in &loaded.data {
        style::print_question_card(q, ctx.cfg.interview.duration_minutes, &ctx.theme);
    }
    Ok(())
}

async fn show(args: &ShowArgs, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::SignedIn)?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let loaded = action::load_question(&api, &QuestionId::new(args.question_id.as_str())).await;
    if let Some(notice) = &loaded.notice {
        style::print_notice(notice);
    }
    style::print_question_detail(&loaded.data, &ctx.theme);
    Ok(())
}

async fn create(args: &CreateArgs, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::Admin)?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let new = NewQuestion {
        title: args.title.clone(),
        description: args.description.clone(),
        difficulty: args.difficulty,
        language: args.languages.clone(),
        test_cases: args.test_cases.clone(),
    };
    let q = action::create_question(&api, &new).await?;
    print_success!("Created question #{} '{}'", q.id, q.title);
    Ok(())
}

async fn update(args: &UpdateArgs, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::Admin)?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let patch = QuestionPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        difficulty: args.difficulty,
        language: non_empty(&args.languages),
        test_cases: non_empty(&args.test_cases),
    };
    let q = action::update_question(&api, &QuestionId::new(args.question_id.as_str()), &patch).await?;
    print_success!("Updated question #{} '{}'", q.id, q.title);
    Ok(())
}

async fn delete(args: &DeleteArgs, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::Admin)?;

    if !args.yes {
        let ok = interactive::util::confirm(&format!("Delete question #{}?", args.question_id))?;
        ensure!(ok, "Canceled");
    }

    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;
    action::delete_question(&api, &QuestionId::new(args.question_id.as_str())).await?;
    print_success!("Deleted question #{}", args.question_id);
    Ok(())
}

fn non_empty<T: Clone>(v: &[T]) -> Option<Vec<T>> {
    (!v.is_empty()).then(|| v.to_vec())
}
