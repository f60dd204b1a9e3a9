use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use meal_plan_engine::cli::{Cli, Command};
use meal_plan_engine::error::{PlanError, Result};
use meal_plan_engine::interface::{
    display_plan, display_profiles, display_swap_candidates, prompt_resolve_item,
    prompt_swap_choice, prompt_yes_no,
};
use meal_plan_engine::models::{Cycle, ExclusionState, IngredientHints};
use meal_plan_engine::planner::{
    GenerationRequest, PlanGenerator, apply_swap, boost_price, swap_candidates,
};
use meal_plan_engine::state::{
    CatalogIndex, export_plan_csv, load_catalog, load_hints, load_history, load_plan,
    load_profiles, save_plan,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            ref profile,
            ref month,
            ref cycle,
            no_dup_check,
            seed,
            ref history,
            ref today,
            ref hints,
            ref out,
            ref csv,
        } => {
            let cycle: Cycle = cycle.parse()?;
            let today = parse_today(today.as_deref())?;
            cmd_generate(
                &cli.catalog,
                &cli.profiles,
                GenerateArgs {
                    profile,
                    month,
                    cycle,
                    duplication_check: !no_dup_check,
                    seed,
                    history: history.as_deref(),
                    today,
                    hints: hints.as_deref(),
                    out: out.as_deref(),
                    csv: csv.as_deref(),
                },
            )
        }
        Command::Swap {
            ref plan,
            week,
            ref item,
            ref history,
            ref today,
        } => {
            let today = parse_today(today.as_deref())?;
            cmd_swap(&cli.catalog, plan, week, item, history.as_deref(), today)
        }
        Command::Boost { ref plan } => cmd_boost(&cli.catalog, plan),
        Command::Profiles => cmd_profiles(&cli.profiles),
    }
}

fn parse_today(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| PlanError::InvalidInput(format!("invalid date: {}", s))),
        None => Ok(Local::now().date_naive()),
    }
}

fn load_exclusions(history: Option<&Path>, today: NaiveDate) -> Result<Option<ExclusionState>> {
    let Some(path) = history else {
        return Ok(None);
    };
    let servings = load_history(path)?;
    println!("Loaded {} past servings", servings.len());
    Ok(Some(ExclusionState::from_history(&servings, today)))
}

struct GenerateArgs<'a> {
    profile: &'a str,
    month: &'a str,
    cycle: Cycle,
    duplication_check: bool,
    seed: Option<u64>,
    history: Option<&'a Path>,
    today: NaiveDate,
    hints: Option<&'a Path>,
    out: Option<&'a Path>,
    csv: Option<&'a Path>,
}

/// Generate and render a monthly plan.
fn cmd_generate(catalog_path: &Path, profiles_path: &Path, args: GenerateArgs<'_>) -> Result<()> {
    let registry = load_profiles(profiles_path)?;
    let catalog = load_catalog(catalog_path)?;
    println!("Loaded {} active menu items, {} profiles", catalog.len(), registry.len());

    if catalog.is_empty() {
        println!("Catalog is empty; nothing to plan.");
        return Ok(());
    }

    let exclusions = load_exclusions(args.history, args.today)?;
    let hints: Option<IngredientHints> = args.hints.map(load_hints).transpose()?;

    let mut request = GenerationRequest::new(args.month, args.cycle)
        .with_duplication_check(args.duplication_check);
    if let Some(exclusions) = exclusions.as_ref() {
        request = request.with_exclusions(exclusions);
    }
    if let Some(hints) = hints.as_ref() {
        request = request.with_ingredient_hints(hints);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generator = PlanGenerator::new(&registry, &catalog);
    let plan = generator.generate(args.profile, &request, &mut rng)?;

    display_plan(&plan);

    if let Some(path) = args.out {
        save_plan(path, &plan)?;
        println!("Plan saved to {}", path.display());
    }
    if let Some(path) = args.csv {
        export_plan_csv(path, &plan)?;
        println!("CSV written to {}", path.display());
    }

    Ok(())
}

/// Show replacements for one slot and apply the operator's choice.
fn cmd_swap(
    catalog_path: &Path,
    plan_path: &Path,
    week: u8,
    query: &str,
    history: Option<&Path>,
    today: NaiveDate,
) -> Result<()> {
    let mut plan = load_plan(plan_path)?;
    let index = CatalogIndex::new(load_catalog(catalog_path)?);

    let current_week = plan.week(week).ok_or(PlanError::WeekOutOfRange(week))?;
    let original = match current_week.items.iter().find(|i| i.id == query) {
        Some(item) => item.clone(),
        None => {
            let resolved = prompt_resolve_item(&index, query)?;
            current_week
                .items
                .iter()
                .find(|i| i.id == resolved.id)
                .cloned()
                .ok_or_else(|| PlanError::ItemNotFound(format!("{} in week {}", resolved.id, week)))?
        }
    };

    let exclusions = load_exclusions(history, today)?;
    let candidates = swap_candidates(&plan, &original, week, index.items());
    display_swap_candidates(
        &original,
        &candidates,
        exclusions.as_ref().map(|state| (state, plan.cycle, today)),
    );

    let Some(choice) = prompt_swap_choice(&original, &candidates)? else {
        println!("Plan unchanged.");
        return Ok(());
    };

    apply_swap(&mut plan, week, &original.id, choice.clone())?;
    if let Some(updated) = plan.week(week) {
        for warning in &updated.warnings {
            println!("  ! {}", warning);
        }
    }

    if prompt_yes_no("Save updated plan?", true)? {
        save_plan(plan_path, &plan)?;
        println!("Plan saved.");
    }

    Ok(())
}

/// Run the price booster over weeks below target.
fn cmd_boost(catalog_path: &Path, plan_path: &Path) -> Result<()> {
    let mut plan = load_plan(plan_path)?;
    if plan.profile.parent.is_some() {
        println!("{} is projected from its parent; boost the parent plan instead.", plan.profile.name);
        return Ok(());
    }

    let catalog = load_catalog(catalog_path)?;
    let mut boosted_weeks = 0;

    for idx in 0..plan.weeks.len() {
        if plan.weeks[idx].total_price >= plan.profile.target_price {
            continue;
        }
        let used = plan.used_ids();
        let boosted = boost_price(&plan.weeks[idx], &plan.profile, &catalog, &used);
        println!(
            "Week {}: price {:.0} -> {:.0}",
            boosted.week, plan.weeks[idx].total_price, boosted.total_price
        );
        plan.weeks[idx] = boosted;
        boosted_weeks += 1;
    }

    if boosted_weeks == 0 {
        println!("All weeks meet the price target.");
        return Ok(());
    }

    display_plan(&plan);
    save_plan(plan_path, &plan)?;
    println!("Plan saved.");
    Ok(())
}

/// Validate and list profiles.
fn cmd_profiles(profiles_path: &Path) -> Result<()> {
    let registry = load_profiles(profiles_path)?;
    display_profiles(&registry);
    Ok(())
}
