use std::io::BufRead as _;
use std::sync::Arc;

use colored::Colorize as _;
use codeiv_core::{
    action,
    auth::Requirement,
    interactive,
    interview::{InterviewEvent, InterviewSession, InterviewView, Phase, SubmissionController},
    notice::Notice,
    storage::SolutionFile,
    style,
    timer::{self, TimerState},
    ThemeSettings,
};
use codeiv_webclient::QuestionId;
use indicatif::ProgressBar;
use tokio::sync::mpsc::UnboundedSender;

use super::SubcmdResult;
use crate::{context::AppContext, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    pub question_id: String,

    /// Countdown length; defaults to `interview.duration_minutes`
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub minutes: Option<u32>,

    /// Start in this language instead of the question's first one
    #[arg(short, long)]
    pub language: Option<String>,
}

const HELP: &str = "Commands: start | submit | lang <name> | restart | quit";

pub async fn exec(args: &Args, ctx: &mut AppContext) -> SubcmdResult {
    action::ensure_access(&ctx.auth, Requirement::SignedIn)?;
    let api = action::connect_api(&mut ctx.auth, &ctx.cfg.api).await?;

    let loaded = action::load_question(&api, &QuestionId::new(args.question_id.as_str())).await;
    if let Some(notice) = &loaded.notice {
        style::print_notice(notice);
    }
    let question = loaded.data;

    let mut ctl = SubmissionController::new(question, ctx.cfg.interview.duration_minutes);
    if let Some(lang) = &args.language {
        ctl.switch_language(lang)?;
    }
    if let Some(minutes) = args.minutes {
        ctl.arm_timer(minutes)?;
    }

    let solution = SolutionFile::new(
        &ctx.cfg.interview.workspace_dir,
        &ctl.question().id,
        ctl.language(),
    );
    let session = InterviewSession::new(ctl, Arc::new(api), ctx.cfg.api.timeout());
    spawn_stdin_reader(session.event_sender());

    let mut view = TerminalView::new(solution, ctx.theme);
    let ctl = session.run(&mut view).await;

    if let Some(res) = ctl.resolution() {
        log::debug!("Final score {} (fallback: {})", res.report().score, res.is_fallback());
    }
    Ok(())
}

fn parse_command(line: &str) -> Option<InterviewEvent> {
    let mut words = line.split_whitespace();
    let event = match words.next()? {
        "start" => InterviewEvent::StartTimer,
        "submit" => InterviewEvent::SubmitClicked,
        "lang" | "language" => InterviewEvent::SwitchLanguage(words.next()?.to_owned()),
        "restart" => InterviewEvent::Restart,
        "quit" | "q" | "exit" => InterviewEvent::Quit,
        _ => return None,
    };
    Some(event)
}

/// Blocking stdin lives on its own thread so it never holds up runtime shutdown.
fn spawn_stdin_reader(tx: UnboundedSender<InterviewEvent>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(event) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                None => println!("{}", HELP.bright_black()),
            }
        }
        let _ = tx.send(InterviewEvent::Quit);
    });
}

struct TerminalView {
    solution: SolutionFile,
    theme: ThemeSettings,
    last_phase: Option<&'static str>,
    clock: Option<ProgressBar>,
    spinner: Option<ProgressBar>,
}

impl TerminalView {
    fn new(solution: SolutionFile, theme: ThemeSettings) -> Self {
        Self {
            solution,
            theme,
            last_phase: None,
            clock: None,
            spinner: None,
        }
    }

    fn print(&self, f: impl FnOnce()) {
        match &self.clock {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    fn finish_bars(&mut self) {
        if let Some(bar) = self.clock.take() {
            bar.finish_and_clear();
        }
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
    }
}

impl InterviewView for TerminalView {
    fn render_phase(&mut self, ctl: &SubmissionController) {
        let phase = ctl.phase();
        if self.last_phase == Some(phase.name()) {
            return;
        }
        self.last_phase = Some(phase.name());

        match phase {
            Phase::Idle => {
                self.finish_bars();
                style::print_question_detail(ctl.question(), &self.theme);
                println!(
                    "\nEdit {} and type `start` to begin a {} min session.",
                    util::replace_homedir_to_tilde(self.solution.path())
                        .to_string_lossy()
                        .bold(),
                    ctl.duration_minutes(),
                );
                println!("{}", HELP.bright_black());
            }
            Phase::TimerArmed => {
                println!("Timer set to {} min", ctl.duration_minutes());
            }
            Phase::TimerRunning => {
                let bar = ProgressBar::new_spinner();
                let total = u64::from(ctl.duration_minutes()) * 60;
                bar.set_message(format!("{} remaining", timer::format_clock(total)));
                bar.tick();
                self.clock = Some(bar);
            }
            Phase::Submitting => {
                self.spinner = Some(interactive::spinner("Submitting your solution..."));
            }
            Phase::Resolved(res) => {
                self.finish_bars();
                style::print_feedback(res.report(), &self.theme);
                println!("Type `restart` to try again or `quit` to leave.");
            }
        }
    }

    fn render_clock(&mut self, state: TimerState) {
        if let Some(bar) = &self.clock {
            bar.set_message(format!("{} remaining", style::clock(&state, &self.theme)));
            bar.tick();
        }
    }

    fn notify(&mut self, notice: &Notice) {
        self.print(|| style::print_notice(notice));
    }

    fn read_buffer(&mut self) -> Option<String> {
        match self.solution.read() {
            Ok(code) => Some(code),
            Err(e) => {
                log::warn!("Submitting the last known code: {}", e);
                None
            }
        }
    }

    fn write_buffer(&mut self, language: &str, code: &str) {
        self.solution.set_language(language);
        match self.solution.write(code) {
            Ok(path) => self.print(|| {
                println!(
                    "Wrote {} starter code to {}",
                    language,
                    util::replace_homedir_to_tilde(path).to_string_lossy()
                )
            }),
            Err(e) => log::error!("{}", e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(parse_command("start"), Some(InterviewEvent::StartTimer));
        assert_eq!(parse_command("  submit "), Some(InterviewEvent::SubmitClicked));
        assert_eq!(
            parse_command("lang javascript"),
            Some(InterviewEvent::SwitchLanguage("javascript".to_owned()))
        );
        assert_eq!(parse_command("lang"), None);
        assert_eq!(parse_command("q"), Some(InterviewEvent::Quit));
        assert_eq!(parse_command("dance"), None);
    }
}
