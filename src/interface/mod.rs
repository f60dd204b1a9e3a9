pub mod prompts;
pub mod render;

pub use prompts::{prompt_resolve_item, prompt_swap_choice, prompt_yes_no};
pub use render::{display_plan, display_profiles, display_swap_candidates};
