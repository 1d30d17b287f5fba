use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use netmate_application::{DialogueController, TurnNotice, TurnOutcome};
use netmate_core::{Catalog, Conversation, MessageRole};
use netmate_infrastructure::NetmatePaths;

mod bootstrap;

use bootstrap::Overrides;

const COMMANDS: [&str; 5] = ["/issues", "/issue", "/new", "/history", "/help"];

#[derive(Parser)]
#[command(name = "netmate")]
#[command(about = "NetMate - WiFi troubleshooting assistant", long_about = None)]
struct Cli {
    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path to secret.json
    #[arg(long)]
    secret: Option<PathBuf>,
    /// Path to the troubleshooting catalog CSV
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Outage-status service URL
    #[arg(long)]
    outage_endpoint: Option<String>,
    /// Mobile number; prompted for when omitted
    #[arg(long)]
    customer: Option<String>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// One line of user input, interpreted.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Empty,
    Help,
    ListIssues,
    PickIssue(usize),
    NewChat,
    History,
    Unknown(String),
    Message(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return Input::Quit;
    }
    if !trimmed.starts_with('/') {
        return Input::Message(trimmed.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("/issues"), None) => Input::ListIssues,
        (Some("/issue"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::PickIssue(n),
            _ => Input::Unknown(trimmed.to_string()),
        },
        (Some("/new"), None) => Input::NewChat,
        (Some("/history"), None) => Input::History,
        (Some("/help"), None) => Input::Help,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

fn init_logging() -> Option<WorkerGuard> {
    let logs_dir = NetmatePaths::logs_dir().ok()?;
    std::fs::create_dir_all(&logs_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "netmate.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("netmate=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn print_help() {
    println!(
        "{}",
        "Describe your WiFi problem, or use: /issues, /issue <n>, /new, /history, quit"
            .bright_black()
    );
}

fn print_issues(catalog: &Catalog) {
    println!("{}", "Common WiFi Issues".bright_magenta().bold());
    for (idx, record) in catalog.iter().enumerate() {
        println!("  {}", format!("{}. {}", idx + 1, record.issue).magenta());
    }
}

fn print_history(conversation: &Conversation) {
    if conversation.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    for message in conversation.messages() {
        match message.role {
            MessageRole::User => println!("{}", format!("> {}", message.content).green()),
            MessageRole::Assistant => {
                for line in message.content.lines() {
                    println!("{}", line.bright_blue());
                }
            }
        }
    }
}

fn print_outcome(outcome: &TurnOutcome) {
    for notice in &outcome.notices {
        match notice {
            TurnNotice::CheckingOutage | TurnNotice::NoOutage => {
                println!("{}", notice.message().yellow())
            }
            TurnNotice::OutageCheckUnavailable(_) => println!("{}", notice.message().red()),
        }
    }

    let style_reply = |line: &str| {
        if outcome.reset {
            line.bright_green()
        } else {
            line.bright_blue()
        }
    };
    for line in outcome.reply.lines() {
        println!("{}", style_reply(line));
    }
}

/// Shows the advisory pause between questions.
async fn countdown(cooldown: Duration) {
    let secs = cooldown.as_secs();
    if secs == 0 {
        return;
    }
    for remaining in (1..=secs).rev() {
        print!(
            "\r{}",
            format!("You can ask your next question in {remaining} seconds...").bright_black()
        );
        let _ = std::io::stdout().flush();
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    println!("\r{}", "You can now ask your next question.              ".bright_black());
}

async fn run_turn(controller: &DialogueController, conversation: &mut Conversation, text: &str) {
    println!("{}", format!("> {}", text).green());

    match controller.handle_turn(conversation, text).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            countdown(outcome.cooldown).await;
        }
        Err(e) => {
            tracing::error!("Turn failed: {}", e);
            println!(
                "{}",
                "Sorry, I couldn't come up with a response just now. Please try again.".red()
            );
            println!("{}", format!("({e})").bright_black());
        }
    }
}

/// Asks for the mobile number until a valid one is entered.
fn read_customer(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    controller: &DialogueController,
) -> Result<Option<Conversation>> {
    loop {
        match rl.readline("Please enter your mobile number to start: ") {
            Ok(line) => match controller.start_conversation(line.trim()) {
                Ok(conversation) => return Ok(Some(conversation)),
                Err(e) if e.is_invalid_identifier() => {
                    println!(
                        "{}",
                        "Please enter a valid mobile number (numbers only).".red()
                    );
                }
                Err(e) => return Err(e.into()),
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}

/// The main entry point for the NetMate REPL.
///
/// Loads configuration and the catalog, asks for the customer's mobile
/// number, then hands each line to the dialogue controller and waits for
/// the reply before reading the next one.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    // ===== Backend Initialization =====
    let overrides = Overrides {
        config: cli.config,
        secret: cli.secret,
        catalog: cli.catalog,
        outage_endpoint: cli.outage_endpoint,
    };
    let config = bootstrap::load_config(&overrides)?;
    let controller = match bootstrap::build_controller(&config, &overrides) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("[Bootstrap] {:#}", e);
            eprintln!("{}", format!("Error: {:#}", e).red());
            std::process::exit(1);
        }
    };

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== NetMate WiFi Support ===".bright_magenta().bold());

    let preset = cli
        .customer
        .as_deref()
        .map(|raw| controller.start_conversation(raw.trim()));
    let mut conversation = match preset {
        Some(Ok(conversation)) => conversation,
        Some(Err(e)) if e.is_invalid_identifier() => {
            println!("{}", format!("{e}").red());
            match read_customer(&mut rl, &controller)? {
                Some(conversation) => conversation,
                None => return Ok(()),
            }
        }
        Some(Err(e)) => return Err(e.into()),
        None => match read_customer(&mut rl, &controller)? {
            Some(conversation) => conversation,
            None => return Ok(()),
        },
    };

    println!(
        "{}",
        format!("Welcome! Your mobile number: {}", conversation.customer_id()).bright_green()
    );
    print_issues(controller.catalog());
    print_help();
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline("What's your WiFi issue? >> ");

        match readline {
            Ok(line) => {
                let input = parse_input(&line);
                if !matches!(input, Input::Empty) {
                    let _ = rl.add_history_entry(line.trim());
                }

                match input {
                    Input::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Input::Empty => continue,
                    Input::Help => print_help(),
                    Input::ListIssues => print_issues(controller.catalog()),
                    Input::PickIssue(n) => match controller.catalog().get(n - 1) {
                        Some(record) => {
                            let prompt = record.as_user_prompt();
                            run_turn(&controller, &mut conversation, &prompt).await;
                        }
                        None => println!("{}", format!("No issue number {n}.").yellow()),
                    },
                    Input::NewChat => {
                        controller.reset_conversation(&mut conversation);
                        println!("{}", "Started a new chat.".bright_green());
                    }
                    Input::History => print_history(&conversation),
                    Input::Unknown(cmd) => {
                        println!("{}", format!("Unknown command: {cmd}").bright_black())
                    }
                    Input::Message(text) => run_turn(&controller, &mut conversation, &text).await,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
