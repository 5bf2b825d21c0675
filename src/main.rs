use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::info;

use useradmin::api::client::AdminApi;
use useradmin::controller::AdminConsole;
use useradmin::core::config::Config;
use useradmin::core::tracing_init;
use useradmin::prompt::{self, MenuAction, TermConfirm};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let config = Config::from_file(&config_path)
        .context(format!(
            "Failed to load configuration from '{}'. \
            If this is your first time running the console, copy config.example.toml to config.toml and adjust the values.",
            config_path.display()
        ))?;

    // Initialize tracing/logging
    tracing_init::init_tracing(&config.logging);

    // The console is single-threaded and cooperative; one thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        base_url = %config.backend.base_url,
        api_path = %config.backend.api_path,
        log_level = %config.logging.level,
        "Admin console starting"
    );

    let api = AdminApi::new(&config.backend)
        .context("Failed to create API client")?;

    let mut console = AdminConsole::new(api, &config.ui, Box::new(TermConfirm));
    console.init().await;

    loop {
        println!("\n{}", console.view());

        match prompt::main_menu()? {
            MenuAction::Refresh => {
                console.load_roles().await;
                console.load_users().await;
            }
            MenuAction::AddUser => {
                console.open_add_modal();
                if let Some(form) = console.modal_mut() {
                    prompt::edit_form(form)?;
                }
                console.save_user().await;
            }
            MenuAction::EditUser => {
                let Some(id) = prompt::pick_user(console.table().rows())? else {
                    continue;
                };
                if console.open_edit_modal(id).await {
                    if let Some(form) = console.modal_mut() {
                        prompt::edit_form(form)?;
                    }
                    console.save_user().await;
                }
            }
            MenuAction::DeleteUser => {
                let Some(id) = prompt::pick_user(console.table().rows())? else {
                    continue;
                };
                console.delete_user(id).await;
            }
            MenuAction::Quit => break,
        }
    }

    info!("Admin console exiting");

    Ok(())
}
