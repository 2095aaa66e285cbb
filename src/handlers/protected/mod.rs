// handlers/protected - admin-only endpoints.
//
// Every route here sits behind `jwt_auth_middleware`; handlers can rely on an
// `AuthAdmin` extension being present.

pub mod blogs;
pub mod messages;
pub mod properties;
pub mod testimonials;

use serde_json::{json, Value};

pub(crate) fn deleted() -> Value {
    json!({ "success": true })
}
