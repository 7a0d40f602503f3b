//! Business logic for keeping the voice role in sync with voice presence.
//!
//! Services borrow their collaborators (platform capabilities, guild registry) for the
//! duration of one operation and are constructed fresh by each event handler invocation
//! or scheduled job.

pub mod voice_role;

pub use voice_role::VoiceRoleService;
