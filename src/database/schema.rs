// Database schema definitions
// Statements are idempotent so they can run on every startup

pub const ACTIONS_SCHEMA: &str = include_str!("../../migrations/001_actions.sql");
