//! Display views
//!
//! Mode and brightness state, the input-driven selector that owns them,
//! the color policy, and the renderer that turns a fix snapshot into a
//! draw list.

pub mod brightness;
pub mod mode;
pub mod policy;
pub mod renderer;
pub mod selector;

pub use brightness::{BrightnessLevel, BRIGHTNESS_TABLE};
pub use mode::DisplayMode;
pub use policy::{compass_point, satellite_color, HdopClass};
pub use renderer::{Renderer, ViewContext};
pub use selector::{ViewChange, ViewSelector};
