pub mod aggregate;
pub mod attendance_service;
