mod catalog;
mod persistence;

pub use catalog::CatalogIndex;
pub use persistence::{
    export_plan_csv, load_catalog, load_hints, load_history, load_plan, load_profiles, save_plan,
};
