use std::time;

use eyre::{Context, Result};
use resq::app::services::{ActionService, EventService};
use resq::backend::{new_authenticator, new_backend};
use resq::config::{Configuration, init_logger, init_theme, verbose};
use resq::models::Action;
use resq::session::new_session_store;
use resq::{
    app::{App, destruct_terminal_for_panic},
    cli::Command,
};
use tokio::{sync::mpsc, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    Configuration::init(config.clone())?;

    init_logger(&config.log)?;
    verbose!("[+] Logger initialized");

    let theme = init_theme(&config.theme)?;
    verbose!("[+] Theme initialized");

    let session = new_session_store(&config.session).wrap_err("initializing session store")?;
    if cmd.logout() {
        session.clear().await.wrap_err("clearing session")?;
        println!("Logged out.");
        return Ok(());
    }

    let auth = session.load().await.wrap_err("loading session")?;
    match &auth {
        Some(ctx) => verbose!("[+] Restored session for {}", ctx.email()),
        None => verbose!("[+] No stored session, starting at login"),
    }

    let backend = new_backend(&config.api);
    let authenticator = new_authenticator(&config.api);
    verbose!("[+] Using chatbot at {}", config.api.base_url);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut events = EventService::new();
    let token = CancellationToken::new();
    let mut task_set = task::JoinSet::new();

    let event_tx = events.event_tx();
    let service_token = token.clone();
    let service_auth = auth.clone();
    task_set.spawn(async move {
        let mut action_service = ActionService::new(
            std::sync::Arc::new(event_tx),
            &mut action_rx,
            backend,
            authenticator,
            session,
            service_token,
        )
        .with_auth(service_auth);
        action_service.start().await
    });

    let mut app = App::new(theme, action_tx, &mut events, token.clone(), auth);
    if let Err(err) = app.run().await {
        eprintln!("Error: {}", err);
    }

    token.cancel();
    let shutdown = async {
        while let Some(res) = task_set.join_next().await {
            match res {
                Ok(Err(err)) => log::error!("Action service error: {:#}", err),
                Err(err) => log::error!("Task error: {}", err),
                Ok(Ok(())) => {}
            }
        }
    };
    if tokio::time::timeout(time::Duration::from_secs(5), shutdown)
        .await
        .is_err()
    {
        eprintln!("Shutdown timeout reached");
        task_set.abort_all();
    }

    Ok(())
}
