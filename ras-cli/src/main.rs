use std::sync::Arc;

use clap::ArgMatches;

use ras::state::ExplorerConfig;
use ras_api::client::ApiClient;

mod error;
mod input;
mod session;
mod commands;

use error::Context;
use session::Session;

#[tokio::main]
async fn main() {
    use tracing_subscriber::{FmtSubscriber, EnvFilter};

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .expect("failed to initialize global tracing subscriber");

    let end_result = run().await;

    if let Err(err) = end_result {
        println!("{}", err);
    }
}

async fn run() -> error::Result {
    let app_matches = commands::cli().get_matches();

    let mut client_builder = ApiClient::builder();

    let host = app_matches.get_one::<String>("host").unwrap();
    let port = app_matches.get_one::<u16>("port")
        .cloned()
        .unwrap();

    client_builder.secure(app_matches.get_flag("secure"));
    client_builder.port(Some(port));

    if !client_builder.host(host.clone()) {
        return Err(error::Error::from(format!(
            "cannot set host to the value provided. {}",
            host
        )));
    }

    let client = Arc::new(client_builder.build().context("failed to create api client")?);

    let config = ExplorerConfig {
        local_mode: app_matches.get_flag("local"),
        origin: client.url().as_str().trim_end_matches('/').to_string(),
    };

    let group = app_matches.get_one::<String>("group").unwrap();
    let session = Session::open(client, group, config)
        .await
        .context("failed to open the group's drive")?;

    match app_matches.subcommand() {
        None => {
            loop {
                let given = input::read_stdin(">")?;
                let trimmed = given.trim();

                let Ok(args_list) = shell_words::split(trimmed) else {
                    println!("failed to parse command line args");
                    continue;
                };

                let matches = match commands::interactive().try_get_matches_from(args_list) {
                    Ok(m) => m,
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                };

                let result = match matches.subcommand() {
                    Some(("quit", _quit_matches)) => {
                        return Ok(());
                    },
                    Some((cmd, cmd_matches)) => run_subcommand(&session, cmd, cmd_matches).await,
                    _ => unreachable!()
                };

                if let Err(err) = result {
                    println!("{}", err);
                }
            }
        },
        Some((cmd, cmd_matches)) => run_subcommand(&session, cmd, cmd_matches).await?
    }

    Ok(())
}

async fn run_subcommand(session: &Session, command: &str, matches: &ArgMatches) -> error::Result {
    match command {
        "ls" => commands::ls(session).await,
        "pwd" => commands::pwd(session),
        "cd" => commands::cd(session, matches).await,
        "mkdir" => commands::mkdir(session).await,
        "rename" => commands::rename(session, matches).await,
        "rm" => commands::rm(session, matches).await,
        "cut" => commands::cut(session, matches).await,
        "borrow" => commands::borrow(session, matches).await,
        "paste" => commands::paste(session).await,
        "purge" => commands::purge(session).await,
        "refresh" => commands::refresh(session).await,
        "download" => commands::download(session, matches).await,
        "upload" => commands::upload(session, matches).await,
        "menu" => commands::menu(session, matches).await,
        _ => {
            println!("unknown command");

            Ok(())
        }
    }
}
