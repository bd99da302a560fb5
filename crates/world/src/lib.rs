//! World-side mechanics for the squib module: the explosive block's
//! ignition state machine, the primed fuse entity, and the thin glue the
//! module exposes to the host engine (slot validation, render layers).

mod engine;
mod inventory;
mod primed_squib;
mod render_layer;
mod squib_block;

pub use engine::*;
pub use inventory::*;
pub use primed_squib::*;
pub use render_layer::*;
pub use squib_block::*;
