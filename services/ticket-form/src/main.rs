use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_form::commands::{self, Command};
use ticket_form::intake_client::IntakeClient;
use ticket_form::{clipboard, metrics_server, Config, FormEvent, FormHandle, FormRuntime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the rendered form
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string())
        .eq_ignore_ascii_case("json");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ticket_form=info".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!(
        service = "ticket-form",
        version = env!("CARGO_PKG_VERSION"),
        log_format = if use_json { "json" } else { "text" },
        "Starting ticket form"
    );

    let config = Config::load()?;
    tracing::info!(
        intake_url = %config.intake.url,
        unit_price = %config.raffle.unit_price,
        clipboard = config.ui.clipboard_command.as_deref().unwrap_or("none"),
        "Configuration loaded"
    );

    let metrics_handle = metrics_server::install_recorder()?;
    let metrics_task = match config.metrics.port {
        Some(port) => {
            let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
            Some(tokio::spawn(metrics_server::serve(listener, metrics_handle)))
        }
        None => None,
    };

    let clipboard = clipboard::from_command(config.ui.clipboard_command.as_deref());
    let intake = Arc::new(IntakeClient::new(config.intake.url.clone()));
    let runtime = FormRuntime::new(config, clipboard, intake);

    println!("{}", commands::HELP);
    tokio::spawn(read_commands(runtime.handle()));

    let form = runtime.run(|view| println!("{}", view)).await;

    if let Some(task) = metrics_task {
        task.abort();
    }

    tracing::info!(
        tickets = form.ticket_count().get(),
        total = %form.total_price(),
        "Ticket form closed"
    );

    Ok(())
}

/// Feed stdin lines into the form until `quit` or end of input
async fn read_commands(handle: FormHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match commands::parse(&line) {
                Command::Event(event) => {
                    let quitting = matches!(event, FormEvent::Quit);
                    // stop reading once quitting so shutdown is not held by a pending read
                    if !handle.send(event) || quitting {
                        break;
                    }
                }
                Command::Help => println!("{}", commands::HELP),
                Command::Unknown(input) => {
                    println!("Comando no reconocido: {} (escribe `help`)", input)
                }
            },
            Ok(None) => {
                handle.send(FormEvent::Quit);
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read command");
                handle.send(FormEvent::Quit);
                break;
            }
        }
    }
}
