// Utility Module
// File helpers used by the session

pub mod file_ops;
