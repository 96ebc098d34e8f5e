//! Route tables

pub mod api;
