pub mod types;

pub use types::{
    days_since, decode_records, row_id, Activity, LeadIntake, LeadRecord, LeadSnapshot,
};
