// handlers/public - endpoints that need no authentication.
//
// Reads of the public catalogue, the contact form and admin login.

pub mod auth;
pub mod blogs;
pub mod health;
pub mod messages;
pub mod properties;
pub mod testimonials;
