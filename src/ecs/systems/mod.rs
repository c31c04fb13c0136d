//! Per-tick systems. Each one is a free function over the world; the
//! simulation calls them in a fixed order.

pub mod collision;
pub mod overlay;
pub mod player;
pub mod spawn;
pub mod wander;
