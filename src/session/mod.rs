//! Session state and change propagation

pub mod state;

pub use state::{Session, SelectionObserver};
