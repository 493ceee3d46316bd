//! Core library components.
//!
//! This module contains the credential navigation, service binding ingestion
//! and PEM/DER decoding logic. The CLI is a thin layer on top.

pub mod constants;
pub mod credentials;
pub mod crypto;
pub mod environment;
pub mod types;
