//! Repertoire - Terminal Chess Exercise Trainer Library
//!
//! This module exposes the trainer logic for testing and external use.

pub mod board_geometry;
pub mod build_info;
pub mod constants;
pub mod exercise;
pub mod exercise_loader;
pub mod input;
pub mod pool;
pub mod selection;
pub mod session_log;
pub mod trainer_logic;
pub mod ui;
