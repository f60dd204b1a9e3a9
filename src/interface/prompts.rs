use dialoguer::{Confirm, Select};

use crate::error::{PlanError, Result};
use crate::models::MenuItem;
use crate::state::CatalogIndex;

/// Resolve an item by id, exact name, or fuzzy name with confirmation.
pub fn prompt_resolve_item<'a>(index: &'a CatalogIndex, query: &str) -> Result<&'a MenuItem> {
    if let Some(item) = index.get(query) {
        return Ok(item);
    }
    if let Some(item) = index.find_by_name(query) {
        return Ok(item);
    }

    let candidates = index.fuzzy_matches(query, 5);

    match candidates.len() {
        0 => Err(PlanError::ItemNotFound(query.to_string())),
        1 => {
            let item = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}' ({})?", item.name, item.id))
                .default(true)
                .interact()?;
            if confirm {
                Ok(item)
            } else {
                Err(PlanError::ItemNotFound(query.to_string()))
            }
        }
        _ => {
            let mut options: Vec<String> = candidates
                .iter()
                .map(|(item, _)| format!("{} ({})", item.name, item.id))
                .collect();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            candidates
                .get(selection)
                .map(|(item, _)| *item)
                .ok_or_else(|| PlanError::ItemNotFound(query.to_string()))
        }
    }
}

/// Let the operator pick a replacement; `None` keeps the original.
pub fn prompt_swap_choice<'a>(
    original: &MenuItem,
    candidates: &[&'a MenuItem],
) -> Result<Option<&'a MenuItem>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    let mut options: Vec<String> = candidates
        .iter()
        .map(|item| {
            format!(
                "{} ({}) - price {:.0}, cost {:.0}, {}",
                item.name, item.id, item.recommended_price, item.cost, item.main_ingredient
            )
        })
        .collect();
    options.push(format!("Keep '{}'", original.name));

    let selection = Select::new()
        .with_prompt(format!("Replace '{}' with", original.name))
        .items(&options)
        .default(0)
        .interact()?;

    Ok(candidates.get(selection).copied())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
