//! Data models for catalog records and request schemas

pub mod book;
