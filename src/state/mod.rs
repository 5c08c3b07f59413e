/// State management module
///
/// This module handles all application state, including:
/// - Persistence areas for session and durable data (storage.rs)
/// - Shared data structures (data.rs)
/// - The login gate (session.rs)
/// - The cached backend configuration (config.rs)
/// - The settings overlay draft (settings.rs)
/// - The upload/extract/edit/save controller (extractor.rs)

pub mod config;
pub mod data;
pub mod extractor;
pub mod session;
pub mod settings;
pub mod storage;
