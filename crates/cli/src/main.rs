use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use httpsh_api::HttpDocumentFetcher;
use httpsh_repl::{CancellationToken, CommandDispatcher, CommandHistory, ExecutionOutcome, NoopTelemetry, ShellState};
use httpsh_shell::{HttpState, ShellConfig, default_dispatcher};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let matches = cli().get_matches();
    let mut session = Session::new(ShellConfig::load())?;

    // `httpsh run <file>` replays a script and exits
    if let Some(("run", sub)) = matches.subcommand() {
        let file = sub.get_one::<String>("file").context("expected a script path")?;
        let outcome = session.execute(&format!("run {file}")).await;
        return Ok(match outcome {
            ExecutionOutcome::Completed => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        });
    }

    if let Some(base_address) = matches.get_one::<String>("base-address") {
        session.execute(&format!("set base {base_address}")).await;
    }
    session.interact().await?;
    Ok(ExitCode::SUCCESS)
}

fn cli() -> Command {
    Command::new("httpsh")
        .about("Interactive shell for exploring HTTP APIs described by OpenAPI")
        .version(env!("CARGO_PKG_VERSION"))
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("base-address")
                .value_name("BASE_ADDRESS")
                .help("Base address to connect to on startup, e.g. http://localhost:5000"),
        )
        .subcommand(
            Command::new("run")
                .about("Run the commands in a script file, then exit")
                .arg(Arg::new("file").value_name("FILE").required(true)),
        )
}

/// Logs go to stderr so they never interleave with shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

struct Session {
    dispatcher: CommandDispatcher<HttpState>,
    shell: ShellState,
    state: HttpState,
}

impl Session {
    fn new(config: ShellConfig) -> Result<Self> {
        let fetcher = HttpDocumentFetcher::new(Duration::from_secs(config.request_timeout_secs))?;
        let shell = ShellState::new(CommandHistory::new(config.history_limit));
        let state = HttpState::new(config, Arc::new(fetcher), Arc::new(NoopTelemetry));
        Ok(Self {
            dispatcher: default_dispatcher(),
            shell,
            state,
        })
    }

    /// Runs one line; Ctrl-C while it runs cancels it.
    async fn execute(&mut self, line: &str) -> ExecutionOutcome {
        let cancellation = CancellationToken::new();
        let interrupt = cancellation.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt.cancel();
            }
        });

        let outcome = self
            .dispatcher
            .execute_line(line, &mut self.shell, &mut self.state, &cancellation)
            .await;
        watcher.abort();

        self.flush_output();
        outcome
    }

    fn flush_output(&mut self) {
        let mut stdout = std::io::stdout().lock();
        for line in self.shell.output.drain() {
            let _ = writeln!(stdout, "{}", line.text);
        }
        let _ = stdout.flush();
    }

    /// Reads lines from stdin until end of input, Ctrl-C at the prompt, or
    /// `exit`.
    async fn interact(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}", self.state.prompt());
            std::io::stdout().flush().context("failed to write prompt")?;

            let line = tokio::select! {
                line = lines.next_line() => line.context("failed to read input")?,
                _ = tokio::signal::ctrl_c() => None,
            };
            let Some(line) = line else {
                println!();
                break;
            };

            self.execute(&line).await;
            if self.shell.exit_requested() {
                break;
            }
        }
        Ok(())
    }
}
