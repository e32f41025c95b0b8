//! Restaurant list commands

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{is_eligible, Category, Restaurant, RestaurantId};
use crate::storage::Project;

fn parse_id(id_str: &str) -> Result<RestaurantId> {
    Ok(id_str.parse()?)
}

fn restaurant_json(restaurant: &Restaurant, eligible: bool) -> serde_json::Value {
    serde_json::json!({
        "id": restaurant.id.to_string(),
        "name": restaurant.name,
        "category": restaurant.category,
        "eligible": eligible,
        "added_by": restaurant.added_by,
        "created_at": restaurant.created_at,
        "updated_at": restaurant.updated_at,
    })
}

pub fn add(output: &Output, name: &str, category: Category) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.restaurant_store();
    let user = project.config().project.effective_user();

    let restaurant = Restaurant::new(name, category)?.with_added_by(user);
    store.append(&restaurant)?;
    output.verbose_ctx("add", &format!("Appended to {}", store.path().display()));

    if output.is_json() {
        let eligible = is_eligible(&restaurant, &project.config().project.filters.active);
        output.data(&restaurant_json(&restaurant, eligible));
    } else {
        output.success(&format!(
            "Added restaurant: {} - {} ({})",
            restaurant.id, restaurant.name, restaurant.category
        ));
    }

    Ok(())
}

pub fn edit(
    output: &Output,
    id_str: &str,
    name: Option<&str>,
    category: Option<Category>,
) -> Result<()> {
    if name.is_none() && category.is_none() {
        anyhow::bail!("Nothing to change: pass --name and/or --category");
    }

    let project = Project::open_current()?;
    let store = project.restaurant_store();
    let id = parse_id(id_str)?;

    let mut restaurant = store
        .get(&id)?
        .ok_or_else(|| anyhow::anyhow!("Restaurant not found: {}", id))?;

    if let Some(name) = name {
        restaurant.rename(name)?;
    }
    if let Some(category) = category {
        restaurant.set_category(category);
    }

    store
        .update(&restaurant)
        .with_context(|| format!("Failed to update {}", id))?;

    if output.is_json() {
        let eligible = is_eligible(&restaurant, &project.config().project.filters.active);
        output.data(&restaurant_json(&restaurant, eligible));
    } else {
        output.success(&format!(
            "Updated restaurant: {} - {} ({})",
            restaurant.id, restaurant.name, restaurant.category
        ));
    }

    Ok(())
}

pub fn remove(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.restaurant_store();
    let id = parse_id(id_str)?;

    let removed = store
        .remove(&id)?
        .ok_or_else(|| anyhow::anyhow!("Restaurant not found: {}", id))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": removed.id.to_string(),
            "name": removed.name,
            "removed": true,
        }));
    } else {
        output.success(&format!("Removed restaurant: {} - {}", removed.id, removed.name));
    }

    Ok(())
}

pub fn list(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let restaurants = project.restaurant_store().read_all()?;
    let filters = &project.config().project.filters.active;

    if output.is_json() {
        let items: Vec<_> = restaurants
            .iter()
            .map(|r| restaurant_json(r, is_eligible(r, filters)))
            .collect();
        output.data(&items);
    } else if restaurants.is_empty() {
        println!("The list is empty! Add a few restaurants to start rolling.");
    } else {
        println!("{:<11} {:<17} {:<4} NAME", "ID", "CATEGORY", "ON");
        println!("{}", "-".repeat(60));

        for r in &restaurants {
            let on = if is_eligible(r, filters) { "*" } else { "" };
            println!("{:<11} {:<17} {:<4} {}", r.id, r.category, on, r.name);
        }

        output.blank();
        println!("{} restaurant(s)", restaurants.len());
    }

    Ok(())
}

pub fn pool(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let restaurants = project.restaurant_store().read_all()?;
    let filters = &project.config().project.filters.active;

    let pool: Vec<_> = restaurants.iter().filter(|r| is_eligible(r, filters)).collect();
    output.verbose_ctx(
        "pool",
        &format!("{} of {} restaurants eligible", pool.len(), restaurants.len()),
    );

    if output.is_json() {
        output.data(&serde_json::json!({
            "filters": filters,
            "count": pool.len(),
            "total": restaurants.len(),
            "restaurants": pool.iter().map(|r| restaurant_json(r, true)).collect::<Vec<_>>(),
        }));
    } else if pool.is_empty() {
        println!("Nothing to roll: no restaurants match the active filters");
    } else {
        println!("{} of {} restaurant(s) in the pool:", pool.len(), restaurants.len());
        for r in &pool {
            println!("  {} ({})", r.name, r.category);
        }
    }

    Ok(())
}
