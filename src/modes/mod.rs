pub mod auto_play;
pub mod human;

pub use auto_play::{gap_tracking_policy, AutoPlayMode, PlaybackSpeed};
pub use human::HumanMode;
