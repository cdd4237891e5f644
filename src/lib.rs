//! Space-invaders engine with a terminal front end.
//!
//! `entities` and `compute` form the pure core: a reducer that folds typed
//! events (`Tick`/`Move`/`Shoot`/`Restart`) over immutable state snapshots.
//! The binary layers the crossterm input and rendering adapters on top and
//! never feeds anything back into the core.

pub mod compute;
pub mod entities;
