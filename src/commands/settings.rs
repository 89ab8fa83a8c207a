// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::defaults::CURRENCIES;
use crate::models::Language;
use crate::storage::KeyValueStorage;
use crate::store::AppState;
use crate::utils::{pretty_table, required};
use anyhow::{Result, bail};

pub fn handle<S: KeyValueStorage>(state: &mut AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let symbol = required(sub, "symbol")?;
            if !CURRENCIES.contains(&symbol) {
                bail!("Unsupported currency '{}' (use {})", symbol, CURRENCIES.join(" or "));
            }
            state.set_currency(symbol)?;
            println!("Currency set to {}", symbol);
        }
        Some(("language", sub)) => {
            let Some(lang) = Language::parse(required(sub, "lang")?) else {
                bail!("Unsupported language (use en or tr)");
            };
            state.set_language(lang)?;
            println!("Language set to {}", lang.as_str());
        }
        _ => {
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![
                        vec!["Currency".into(), state.currency().to_string()],
                        vec!["Language".into(), state.language().as_str().to_string()],
                    ],
                )
            );
        }
    }
    Ok(())
}
