pub mod config;
pub mod constants;
pub mod display;
pub mod drag;
pub mod engine;
pub mod error;
pub mod preset;
pub mod projection;
pub mod ramp;
pub mod routing;
pub mod scene;
pub mod transport;
pub mod vector;

pub use config::*;
pub use constants::*;
pub use display::*;
pub use drag::*;
pub use engine::*;
pub use error::StageError;
pub use preset::*;
pub use projection::*;
pub use ramp::*;
pub use routing::*;
pub use scene::*;
pub use transport::*;
pub use vector::*;
