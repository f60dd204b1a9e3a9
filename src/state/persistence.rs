use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{
    HistoricalServing, IngredientHints, MenuItem, MonthlyMealPlan, ProfileRegistry, TargetProfile,
};

/// Load the active catalog from a JSON file.
///
/// Items flagged `unused` are dropped; duplicate ids keep the last occurrence
/// at the position of the first.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<MenuItem>> {
    let content = fs::read_to_string(path)?;
    let items: Vec<MenuItem> = serde_json::from_str(&content)?;

    let mut order: Vec<String> = Vec::new();
    let mut seen: HashMap<String, MenuItem> = HashMap::new();
    for item in items {
        if !seen.contains_key(&item.id) {
            order.push(item.id.clone());
        }
        seen.insert(item.id.clone(), item);
    }

    Ok(order
        .into_iter()
        .filter_map(|id| seen.remove(&id))
        .filter(|item| !item.unused)
        .collect())
}

/// Load and validate the profile registry.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<ProfileRegistry> {
    let content = fs::read_to_string(path)?;
    let profiles: Vec<TargetProfile> = serde_json::from_str(&content)?;
    ProfileRegistry::new(profiles)
}

pub fn load_history<P: AsRef<Path>>(path: P) -> Result<Vec<HistoricalServing>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load cross-profile ingredient hints (`{"1": ["beef"], ...}`).
pub fn load_hints<P: AsRef<Path>>(path: P) -> Result<IngredientHints> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<MonthlyMealPlan> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_plan<P: AsRef<Path>>(path: P, plan: &MonthlyMealPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// One CSV row per selected item.
#[derive(Debug, Serialize)]
struct PlanRow<'a> {
    plan_id: &'a str,
    month: &'a str,
    cycle: &'a str,
    profile: &'a str,
    week: u8,
    category: &'a str,
    item_id: &'a str,
    name: &'a str,
    cost: f64,
    recommended_price: f64,
    main_ingredient: &'a str,
    week_valid: bool,
}

/// Write a plan as CSV, one row per week item.
pub fn export_plan_csv<P: AsRef<Path>>(path: P, plan: &MonthlyMealPlan) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for week in &plan.weeks {
        for item in &week.items {
            writer.serialize(PlanRow {
                plan_id: &plan.id,
                month: &plan.month_label,
                cycle: plan.cycle.as_str(),
                profile: &plan.profile.name,
                week: week.week,
                category: item.category.as_str(),
                item_id: &item.id,
                name: &item.name,
                cost: item.cost,
                recommended_price: item.recommended_price,
                main_ingredient: &item.main_ingredient,
                week_valid: week.is_valid,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Cycle, WeeklyCyclePlan};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_catalog_drops_unused_and_dedupes() {
        let json = r#"[
            {"id": "s-1", "name": "Radish Soup", "category": "soup", "cost": 800, "recommendedPrice": 2500},
            {"id": "m-1", "name": "Beef Bulgogi", "category": "main", "cost": 2100, "recommendedPrice": 5900, "unused": true},
            {"id": "s-1", "name": "Radish Soup v2", "category": "soup", "cost": 900, "recommendedPrice": 2600}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].name, "Radish Soup v2");
    }

    #[test]
    fn test_load_profiles_validates() {
        let json = r#"[
            {"name": "family", "price": 30000, "costRatio": 0.4, "targetPrice": 25000,
             "composition": {"soup": 1, "main": 2, "side": 4}, "bannedTags": ["spicy"]},
            {"name": "couple", "price": 20000, "costRatio": 0.4, "targetPrice": 15000,
             "composition": {"soup": 1, "main": 1, "side": 3}, "parent": "family"}
        ]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let registry = load_profiles(file.path()).unwrap();
        let couple = registry.get("couple").unwrap();
        assert_eq!(couple.count_for(Category::Side), 3);
        assert_eq!(registry.resolve_parent(couple).unwrap().name, "family");
    }

    #[test]
    fn test_plan_roundtrip_and_csv() {
        let profile: TargetProfile = serde_json::from_str(
            r#"{"name": "family", "price": 30000, "costRatio": 0.4, "targetPrice": 0,
                "composition": {"soup": 1}}"#,
        )
        .unwrap();
        let item: MenuItem = serde_json::from_str(
            r#"{"id": "s-1", "name": "Radish Soup", "category": "soup", "cost": 800, "recommendedPrice": 2500}"#,
        )
        .unwrap();
        let plan = MonthlyMealPlan {
            id: "plan-1".to_string(),
            month_label: "2026-11".to_string(),
            cycle: Cycle::TueFri,
            profile,
            weeks: vec![WeeklyCyclePlan {
                week: 1,
                items: vec![item],
                total_cost: 800.0,
                total_price: 2500.0,
                is_valid: true,
                warnings: Vec::new(),
            }],
        };

        let out = NamedTempFile::new().unwrap();
        save_plan(out.path(), &plan).unwrap();
        let reloaded = load_plan(out.path()).unwrap();
        assert_eq!(reloaded.id, "plan-1");
        assert_eq!(reloaded.cycle, Cycle::TueFri);
        assert_eq!(reloaded.weeks[0].items[0].id, "s-1");

        let csv_file = NamedTempFile::new().unwrap();
        export_plan_csv(csv_file.path(), &plan).unwrap();
        let content = fs::read_to_string(csv_file.path()).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("plan_id,month,cycle,profile,week"));
        assert!(lines.next().unwrap().contains("tue-fri,family,1,soup,s-1,Radish Soup"));
    }

    #[test]
    fn test_load_hints() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"1": ["beef", "pork"], "3": ["chicken"]}"#).unwrap();
        let hints = load_hints(file.path()).unwrap();
        assert_eq!(hints.get(&1).unwrap().len(), 2);
        assert!(hints.get(&2).is_none());
    }
}
