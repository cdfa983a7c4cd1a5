use std::sync::Arc;

use chrono::Utc;
use monitor_core::MonitorView;
use monitor_engine::{ChannelNotificationSink, MonitorHandle, ReqwestStatusFetcher};
use monitor_logging::{monitor_info, monitor_warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::config::MonitorConfig;
use super::render;

const HELP: &str = "commands: added (new data source registered), status, quit";

enum Command {
    JobSubmitted,
    Status,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "" => None,
        "added" | "job" => Some(Command::JobSubmitted),
        "status" => Some(Command::Status),
        "quit" | "exit" => Some(Command::Quit),
        _ => Some(Command::Unknown),
    }
}

/// Runs the monitor until Ctrl-C or `quit`, rendering state and notifications.
pub async fn run(config: MonitorConfig) -> anyhow::Result<()> {
    let fetcher = ReqwestStatusFetcher::new(&config.status_url, config.fetch_settings())?;
    monitor_info!("Polling {}", fetcher.url());
    println!("Watching {}", fetcher.url());
    println!("{HELP}");

    let (sink, mut notices) = ChannelNotificationSink::channel();
    let handle = MonitorHandle::spawn(Arc::new(fetcher), config.poll_policy(), Arc::new(sink));
    let mut updates = handle.subscribe();
    let mut last_view: Option<MonitorView> = None;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().view();
                // Only re-render when something visible moved.
                if last_view.as_ref() != Some(&view) {
                    println!("{}", render::status_line(&view));
                    last_view = Some(view);
                }
            }
            Some(event) = notices.recv() => {
                println!("{}", render::notification_line(&event, Utc::now()));
            }
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(Command::JobSubmitted) => handle.job_submitted(),
                    Some(Command::Status) => {
                        println!("{}", render::status_line(&handle.snapshot().view()));
                    }
                    Some(Command::Quit) => break,
                    Some(Command::Unknown) => println!("{HELP}"),
                    None => {}
                },
                Ok(None) => stdin_open = false,
                Err(err) => {
                    monitor_warn!("stdin closed: {}", err);
                    stdin_open = false;
                }
            },
        }
    }

    handle.shutdown().await;
    monitor_info!("Monitor shut down");
    Ok(())
}
