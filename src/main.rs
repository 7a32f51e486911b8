use anyhow::Result;
use calcore::{AngleMode, Session};
use clap::Parser;
use std::io::{self, BufRead};

#[derive(Parser)]
#[command(name = "calcore")]
#[command(about = "Evaluate scientific calculator expressions")]
struct Cli {
    /// Angle unit used by sin, cos and tan (degrees or radians)
    #[arg(short, long, default_value_t = AngleMode::Degrees)]
    mode: AngleMode,

    /// Expressions to evaluate, in order. `ans` refers to the previous
    /// result. Reads one expression per line from stdin when omitted
    expressions: Vec<String>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut session = Session::new(cli.mode);

    if !cli.expressions.is_empty() {
        for expression in &cli.expressions {
            println!("{}", session.evaluate_line(expression));
        }
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        match line {
            "" => {}
            ":deg" => session.set_angle_mode(AngleMode::Degrees),
            ":rad" => session.set_angle_mode(AngleMode::Radians),
            ":history" => {
                for entry in session.history() {
                    println!("{} = {}", entry.expression, entry.result);
                }
            }
            ":clear" => session.reset(),
            expression => println!("{}", session.evaluate_line(expression)),
        }
    }
    Ok(())
}

/// Install the log subscriber. Logs go to stderr so results can be piped.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only warnings from calcore unless RUST_LOG says otherwise
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("calcore=warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
