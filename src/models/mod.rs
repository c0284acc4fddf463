pub mod device;
pub mod light_state;
pub mod payload;
pub mod registry;

pub use device::LightDevice;
pub use light_state::{ColorMode, LightState};
pub use payload::{LightPayload, StatePayload};
pub use registry::LightRegistry;
