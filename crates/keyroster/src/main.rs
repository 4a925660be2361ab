//! `keyroster` - edit backend accounts from the terminal.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::io::{IsTerminal as _, Write as _};
use std::sync::Arc;

use anyhow::Context as _;
use keyroster::shell::HELP;
use keyroster::{AccountForm, Command, execute, render, render_notifications};
use keyroster_api::AccountsClient;
use keyroster_core::{
    AccountStore, DesktopNotifier, LogNotifier, MemoryNotifier, Notifier, Settings,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "keyroster=info,keyroster_core=info,keyroster_api=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting keyroster");

    let settings = Settings::load().await.context("loading settings")?;
    let config = settings.client_config()?;
    info!("Using backend at {}", config.base_url);
    let client = AccountsClient::new(&config)?;

    // Interactive sessions without desktop popups print notifications below
    // the table; piped sessions leave them to the log.
    let inline = (!settings.desktop_notifications && std::io::stdin().is_terminal())
        .then(|| Arc::new(MemoryNotifier::new()));
    let notifier: Arc<dyn Notifier> = match &inline {
        Some(inline) => inline.clone(),
        None if settings.desktop_notifications => Arc::new(DesktopNotifier::new("keyroster")),
        None => Arc::new(LogNotifier),
    };
    let show = |form: &AccountForm<AccountsClient>| {
        print!("{}", render(form));
        if let Some(inline) = &inline {
            print!("{}", render_notifications(&inline.drain()));
        }
    };

    let mut form = AccountForm::new(AccountStore::new(client, notifier));
    form.load_accounts().await;
    show(&form);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Help) => println!("{HELP}"),
            Ok(command) => match execute(&mut form, command).await {
                Ok(true) => show(&form),
                Ok(false) => break,
                Err(e) => eprintln!("{e}"),
            },
            Err(e) => eprintln!("{e} (try `help`)"),
        }
    }

    info!("Bye");
    Ok(())
}
