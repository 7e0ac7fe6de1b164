//! Auth types shared across Leadtrack services.
//!
//! Provides the `PrincipalHeaders` extractor for gateway-injected identity.

pub mod identity;
