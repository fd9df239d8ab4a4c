//! In-memory store layer for Tally
//!
//! Each repository exclusively owns one collection behind a single
//! `RwLock`, so every check-then-write (email uniqueness, id uniqueness,
//! upsert by external id) runs under one write guard. Repositories are cheap
//! handles: clone them to share the same collection.

pub mod todo;
pub mod user;

pub use todo::TodoRepository;
pub use user::UserRepository;
