//! Pages served behind the request pipeline.
//!
//! Rendering is not this crate's concern; each page answers with a small JSON
//! body describing what the pipeline resolved for the request.

pub mod controller;
pub mod router;
