mod attendance;
mod promotion;
mod student;

pub use attendance::AttendanceCommands;
pub use promotion::PromotionCommands;
pub use student::StudentCommands;
