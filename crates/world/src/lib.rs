#![warn(missing_docs)]
//! Block entities, levels, players and the provider binding protocol.

mod block_entity;
mod level;
mod player;
mod provider;
mod providers;
mod resolve;
mod settings;
mod tooltip;

pub use block_entity::*;
pub use level::*;
pub use player::*;
pub use provider::*;
pub use providers::*;
pub use resolve::*;
pub use settings::*;
pub use tooltip::*;
