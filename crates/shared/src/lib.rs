//! Types shared by the portal views and their front ends.

pub mod domain;
pub mod error;
pub mod protocol;
