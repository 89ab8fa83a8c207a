// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::labels;
use crate::models::CategoryColor;
use crate::storage::KeyValueStorage;
use crate::store::AppState;
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::{Result, anyhow};

fn parse_color(s: &str) -> Result<CategoryColor> {
    CategoryColor::parse(s).ok_or_else(|| {
        let names: Vec<_> = CategoryColor::ALL.iter().map(|c| c.as_str()).collect();
        anyhow!("Unknown colour '{}' (use {})", s, names.join("|"))
    })
}

pub fn handle<S: KeyValueStorage>(state: &mut AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let color = parse_color(required(sub, "color")?)?;
            let cat = state.add_category(required(sub, "name")?, color)?;
            println!("Added category '{}' ({})", cat.name, cat.id);
        }
        Some(("list", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.categories())? {
                let lang = state.language();
                let data = state
                    .categories()
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            labels::category_label(lang, c).to_string(),
                            c.color.to_string(),
                            if c.is_system { "system" } else { "custom" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Category", "Colour", "Kind"], data)
                );
            }
        }
        Some(("color", sub)) => {
            let id = required(sub, "id")?.trim();
            state.set_category_color(id, parse_color(required(sub, "color")?)?)?;
            println!("Updated colour of '{}'", id);
        }
        Some(("rm", sub)) => {
            let cat = state.delete_category(required(sub, "id")?.trim())?;
            println!("Removed category '{}'", cat.name);
        }
        _ => {}
    }
    Ok(())
}
