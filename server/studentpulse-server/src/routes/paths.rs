//! Route path constants
//!
//! Centralized path definitions keep the router and the OpenAPI
//! annotations in sync.

/// API prefix all data routes are nested under
pub const API: &str = "/api";

pub mod health {
    pub const HEALTH: &str = "/health";
    pub const VERSION: &str = "/version";
}

pub mod auth {
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const ME: &str = "/me";
}

pub mod students {
    pub const ROOT: &str = "/";
    pub const LEVELS: &str = "/levels/:subject";
    pub const CATEGORIES: &str = "/categories/:subject";
    pub const WARD_AVERAGE: &str = "/ward-average/:subject";
    pub const WARD_ATTENDANCE: &str = "/ward-attendance";
    pub const SUBJECT_TOTALS: &str = "/subject-totals";
    pub const CLASS_ATTENDANCE: &str = "/class-attendance";
}
