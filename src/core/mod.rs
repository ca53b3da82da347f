// src/core/mod.rs

pub mod clock;
pub mod html;
pub mod sanitize;
