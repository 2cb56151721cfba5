//! Shared contracts between the admin frontend and the store API.
//!
//! Everything here is plain data plus pure logic, so it builds and tests on
//! any target (the frontend pulls it into wasm32).

pub mod domain;
pub mod shared;
pub mod system;
