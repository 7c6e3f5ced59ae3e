/// API route handlers
///
/// - `health`: Health check endpoint
/// - `courses`: Course creation, listing and detail

pub mod courses;
pub mod health;
