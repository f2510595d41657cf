pub mod attendance;
pub mod backfill;
pub mod dispatch;
pub mod promotion;
pub mod shared;
pub mod student;
