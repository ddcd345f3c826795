use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use codeiv_webclient::{Difficulty, Question, ScoreReport, SessionRecord, UserProfile};

use crate::notice::{Notice, NoticeKind};
use crate::theme::ThemeSettings;
use crate::timer::{self, TimerState};

#[macro_export]
macro_rules! print_success {
    ($msg:literal) => {
        $crate::print_success!("{}", $msg)
    };
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for NoticeKind {
    fn color(&self) -> Color {
        match self {
            NoticeKind::Info => Color::Cyan,
            NoticeKind::Destructive => Color::BrightRed,
        }
    }
}

const BOLD_LINE: &str = "━";
const THIN_LINE: &str = "─";

fn term_cols() -> usize {
    let (cols, _) = terminal::size().unwrap_or((60, 40));
    cols as usize
}

fn print_sub_title(s: &str, cols: usize) {
    println!(
        "{} {}",
        s.cyan().bold(),
        THIN_LINE
            .repeat(cols.saturating_sub(s.chars().count() + 1))
            .bright_black(),
    )
}

pub fn difficulty_badge(d: Difficulty, theme: &ThemeSettings) -> ColoredString {
    format!(" {} ", d).on_color(theme.difficulty_color(d)).bold().black()
}

pub fn score_badge(score: u8, theme: &ThemeSettings) -> ColoredString {
    format!("{}/100", score).color(theme.score_color(score)).bold()
}

pub fn clock(state: &TimerState, theme: &ThemeSettings) -> ColoredString {
    let s = timer::format_clock(state.remaining_secs);
    if state.is_low_time() {
        s.color(theme.low_time_color()).bold()
    } else {
        s.color(theme.accent())
    }
}

pub fn print_notice(notice: &Notice) {
    println!(
        "{} {}",
        format!("[{}]", notice.title).color(notice.kind.color()).bold(),
        notice.description
    );
}

/// One entry of the question list.
pub fn print_question_card(q: &Question, duration_minutes: u32, theme: &ThemeSettings) {
    println!(
        "{} {} {}",
        format!("#{}", q.id).bright_black(),
        q.title.bold(),
        difficulty_badge(q.difficulty, theme),
    );
    println!(
        "    {} min | {}",
        duration_minutes,
        q.language.join(", ").bright_black()
    );
}

pub fn print_question_detail(q: &Question, theme: &ThemeSettings) {
    let cols = term_cols();
    println!(
        "\n{} {}\n{}",
        q.title.color(theme.accent()).bold(),
        difficulty_badge(q.difficulty, theme),
        BOLD_LINE.repeat(cols).color(theme.accent()),
    );
    println!("{}\n", q.description);

    if !q.test_cases.is_empty() {
        print_sub_title("Test Cases", cols);
        for t in &q.test_cases {
            println!("  {} {}", "Input: ".bold(), t.input);
            println!("  {} {}", "Output:".bold(), t.expected_output);
        }
    }
    println!("{}: {}", "Languages".bold(), q.language.join(", "));
}

pub fn print_feedback(report: &ScoreReport, theme: &ThemeSettings) {
    let cols = term_cols();
    println!(
        "\n{} {}\n{}",
        "AI Feedback".bold(),
        score_badge(report.score, theme),
        BOLD_LINE.repeat(cols).color(theme.accent()),
    );
    println!("{}", report.feedback);
    println!("{}", BOLD_LINE.repeat(cols).color(theme.accent()));
}

pub fn print_session_row(s: &SessionRecord, theme: &ThemeSettings) {
    println!(
        "{}  {}  {:<11} {:>3} min  {}",
        format!("#{}", s.id).bright_black(),
        s.timestamp.format("%Y-%m-%d"),
        s.language,
        s.duration,
        score_badge(s.score, theme),
    );
}

pub fn print_session_detail(s: &SessionRecord, theme: &ThemeSettings) {
    let cols = term_cols();
    println!(
        "\n{} {}\n{}",
        "Session Details".bold(),
        format!("#{}", s.id).bright_black(),
        BOLD_LINE.repeat(cols).color(theme.accent()),
    );
    println!("{:<10}{}", "Date:", s.timestamp.format("%Y-%m-%d %H:%M"));
    println!("{:<10}{}", "Question:", s.question_id);
    println!("{:<10}{}", "Language:", s.language);
    println!("{:<10}{} minutes", "Duration:", s.duration);
    println!("{:<10}{}", "Score:", score_badge(s.score, theme));

    print_sub_title("Your Code", cols);
    println!("{}", s.code);
    print_sub_title("AI Feedback", cols);
    println!("{}", s.feedback);
}

pub fn print_profile(p: &UserProfile) {
    println!(
        "{} <{}> {}",
        p.display_name.bold(),
        p.email,
        format!("[{}]", p.role).bright_black()
    );
}
