pub mod groups;
pub mod record;
pub mod summary;
pub mod valuation;

pub use groups::{aggregate_group_total, group_by_category, AssetGroupTable, GroupKey};
pub use record::{AssetKind, AssetRecord};
pub use valuation::{compute_gain_loss, value_of, GainLoss};
