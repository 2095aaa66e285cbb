// handlers/mod.rs - two-tier handler layout
//
// Public (no auth) → Protected (admin bearer token). Routes for both tiers
// are assembled in lib.rs; the gate is applied to the protected router only.

pub mod extract;
pub mod protected;
pub mod public;
