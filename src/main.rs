// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;

use pennywise::auth::{AuthProvider, GoTrueProvider, SessionGate};
use pennywise::config::Config;
use pennywise::storage::SqliteStorage;
use pennywise::store::AppState;
use pennywise::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::from_env()?;
    let path = config.db_path()?;
    let mut state = AppState::load(SqliteStorage::open(&path)?)?;

    // Session state lives in the same file on its own connection so the
    // gate can be held while handlers mutate the app state.
    let session_store = SqliteStorage::open(&path)?;
    let provider = config
        .auth
        .clone()
        .map(|auth| GoTrueProvider::new(auth, &session_store));
    let gate = SessionGate::new(
        &session_store,
        provider.as_ref().map(|p| p as &dyn AuthProvider),
    );

    let Some(route) = matches.subcommand_name() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };

    if !cli::requires_session(route) {
        return match matches.subcommand() {
            Some(("login", sub)) => commands::account::login(&gate, sub),
            Some(("register", sub)) => commands::account::register(&gate, sub),
            _ => {
                println!("Data store initialized at {}", path.display());
                Ok(())
            }
        };
    }

    let Some(session) = gate.current()? else {
        bail!("Not signed in. Run `pennywise login` first.");
    };

    match matches.subcommand() {
        Some(("logout", _)) => commands::account::logout(&gate)?,
        Some(("help", _)) => commands::account::help(),
        Some(("dashboard", sub)) => commands::dashboard::handle(&state, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut state, sub)?,
        Some(("calendar", sub)) => commands::calendar::handle(&state, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut state, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut state, sub)?,
        Some(("sub", sub)) => commands::subscriptions::handle(&mut state, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut state, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut state, sub)?,
        Some(("report", sub)) => commands::reports::handle(&state, sub)?,
        Some(("profile", sub)) => commands::account::profile(&state, &gate, &session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
