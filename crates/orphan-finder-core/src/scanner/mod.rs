pub mod walk;

pub use walk::FileWalk;
