use std::rc::Rc;

use crate::api::BridgeClient;
use crate::error::AppError;
use crate::models::device::LightDevice;

/// All lights known to the panel, in bridge enumeration order.
///
/// A refresh rebuilds the whole list; there is no identity diffing. On
/// transport failure the previous list stays intact and the error
/// propagates to the caller.
pub struct LightRegistry {
    client: Rc<BridgeClient>,
    pub lights: Vec<LightDevice>,
}

impl LightRegistry {
    pub fn new(client: Rc<BridgeClient>) -> Self {
        Self {
            client,
            lights: Vec::new(),
        }
    }

    pub fn refresh(&mut self) -> Result<(), AppError> {
        let payloads = self.client.get_lights()?;
        let mut lights = Vec::with_capacity(payloads.len());
        for (id, payload) in payloads {
            if let Some(device) = LightDevice::from_payload(self.client.clone(), id, &payload) {
                lights.push(device);
            }
        }
        log::info!("registry refreshed, {} lights", lights.len());
        self.lights = lights;
        Ok(())
    }

    pub fn find_by_id(&mut self, id: &str) -> Option<&mut LightDevice> {
        self.lights.iter_mut().find(|light| light.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.lights.iter().map(|light| light.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}
