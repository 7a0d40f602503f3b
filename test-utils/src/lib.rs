//! Voicerole Test Utils
//!
//! Provides shared testing utilities for the voicerole bot. The bot talks to Discord through
//! Serenity, so most tests need Serenity model objects (roles, members) that would normally only
//! come from the gateway or REST API. This crate builds those objects from JSON payloads shaped
//! like Discord's responses.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_role};
//!
//! #[tokio::test]
//! async fn test_role_filter() {
//!     let role = create_test_role(111111111, "voice", 1);
//!     let member = create_test_member(42, 222222222, "alice", &[111111111]);
//!     // Use in your tests...
//! }
//! ```

pub mod serenity;
