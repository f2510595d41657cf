//! Entity structs for all cohort domain objects.
//!
//! Promotions and attendance records map to relational tables; students are
//! stored as JSON documents. All structs derive `Serialize`, `Deserialize` and
//! `JsonSchema`, and use camelCase field names on the wire.

mod attendance;
mod promotion;
mod student;

pub use attendance::{AttendanceKey, AttendanceRecord, RollCallEntry};
pub use promotion::{Module, Promotion, PromotionPlan};
pub use student::{
    Incident, NewStudent, SessionRecord, Student, StudentDocument, TeacherNote, TeamAssignment,
    TechnicalTracking, TransversalTracking,
};
