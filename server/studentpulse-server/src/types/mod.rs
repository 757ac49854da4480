//! Shared request/response types

pub mod pagination;

pub use pagination::PaginationParams;
