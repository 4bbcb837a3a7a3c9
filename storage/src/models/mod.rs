mod update_record;
mod update_stats;

pub use update_record::UpdateRecord;
pub use update_stats::UpdateStats;
