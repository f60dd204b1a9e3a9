use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Meal plan console - generate, repair and adjust four-week subscription menus.
#[derive(Parser, Debug)]
#[command(name = "meal_plan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the menu catalog JSON file.
    #[arg(short, long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Path to the target profile JSON file.
    #[arg(short, long, global = true, default_value = "profiles.json")]
    pub profiles: PathBuf,

    /// Log engine decisions at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a four-week plan for one profile and cycle.
    Generate {
        /// Target profile name.
        #[arg(long)]
        profile: String,

        /// Month label stored on the plan, e.g. 2026-11.
        #[arg(long)]
        month: String,

        /// Distribution cycle (mon-thu or tue-fri).
        #[arg(long, default_value = "mon-thu")]
        cycle: String,

        /// Allow items used by earlier weeks or recent history.
        #[arg(long)]
        no_dup_check: bool,

        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Past servings JSON used for 60/30-day exclusion.
        #[arg(long)]
        history: Option<PathBuf>,

        /// Reference date for history windows (YYYY-MM-DD, default today).
        #[arg(long)]
        today: Option<String>,

        /// Ingredients other profiles committed, by week (JSON).
        #[arg(long)]
        hints: Option<PathBuf>,

        /// Write the plan as JSON.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the plan as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List replacements for one item of a saved plan and apply a choice.
    Swap {
        /// Saved plan JSON.
        #[arg(long)]
        plan: PathBuf,

        /// Week containing the item (1-4).
        #[arg(long)]
        week: u8,

        /// Item id or name.
        #[arg(long)]
        item: String,

        /// Past servings JSON, used to show when candidates last ran.
        #[arg(long)]
        history: Option<PathBuf>,

        /// Reference date for history (YYYY-MM-DD, default today).
        #[arg(long)]
        today: Option<String>,
    },

    /// Raise weeks of a saved plan that fall below the price target.
    Boost {
        /// Saved plan JSON.
        #[arg(long)]
        plan: PathBuf,
    },

    /// Validate and list target profiles.
    Profiles,
}
