/// Weeks in one generated plan.
pub const WEEKS_PER_PLAN: u8 = 4;

/// Classifier that never counts towards ingredient repetition limits.
pub const VEGETABLE_INGREDIENT: &str = "vegetable";

/// Maximum occurrences of one non-vegetable ingredient within a single week.
pub const MAX_INGREDIENT_PER_WEEK: usize = 3;

/// Extra candidates beyond the required count kept in the top-price window.
pub const TOP_WINDOW_EXTRA: usize = 4;

/// Multiplier on the required count for the minimum top-price window.
pub const TOP_WINDOW_FACTOR: usize = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Similar-menu detection
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum normalized length for substring containment to count.
pub const SIMILAR_MIN_LEN: usize = 2;

/// Shared keyword must cover this fraction of the shorter name.
pub const SIMILAR_KEYWORD_RATIO: f64 = 0.4;

/// Dish-family keywords. Generic course words ("soup", "salad") are left out;
/// they would dominate short names and flag unrelated dishes.
pub const DISH_KEYWORDS: &[&str] = &[
    // cooking styles
    "stew",
    "braised",
    "stir-fry",
    "stir-fried",
    "grilled",
    "steamed",
    "deep-fried",
    "pancake",
    "seasoned",
    "pickled",
    "jorim",
    "jjigae",
    "bokkeum",
    "jeon",
    "namul",
    "curry",
    "noodle",
    "dumpling",
    "porridge",
    // sauces and bases
    "soybean-paste",
    "doenjang",
    "gochujang",
    "kimchi",
    "soy-sauce",
    "teriyaki",
    "bulgogi",
    "japchae",
    // proteins and headline ingredients
    "beef",
    "pork",
    "chicken",
    "duck",
    "mackerel",
    "pollock",
    "squid",
    "octopus",
    "shrimp",
    "anchovy",
    "tofu",
    "egg",
    "fishcake",
    "sausage",
    "mushroom",
    "radish",
    "spinach",
    "seaweed",
    "bean-sprout",
    "zucchini",
    "eggplant",
    "potato",
];

// ─────────────────────────────────────────────────────────────────────────────
// History windows
// ─────────────────────────────────────────────────────────────────────────────

/// Long lookback window in days.
pub const LONG_LOOKBACK_DAYS: i64 = 60;

/// Short lookback window in days.
pub const SHORT_LOOKBACK_DAYS: i64 = 30;
