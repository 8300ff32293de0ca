// handlers/mod.rs - Two handler tiers
//
// Public (no auth): service info and health.
// Todos (credential auth): every route is scoped to the authenticated user.
pub mod public;
pub mod todos;
