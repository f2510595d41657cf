//! ID prefix constants.
//!
//! Generated IDs look like `att-a3f8b2c1`: a three-letter prefix, a dash and
//! eight lowercase hex characters.

pub const PREFIX_PROMOTION: &str = "pro";
pub const PREFIX_STUDENT: &str = "stu";
pub const PREFIX_ATTENDANCE: &str = "att";
