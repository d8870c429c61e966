pub mod storage;
pub mod types;

pub use storage::{load_plan, save_plan};
pub use types::{RecalcPlan, PLAN_VERSION};
