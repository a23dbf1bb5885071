use crate::model::{Device, ProductType};

/// Devices of one organization split by the product families that are
/// reported on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub switches: Vec<Device>,
    pub access_points: Vec<Device>,
    pub cameras: Vec<Device>,
}

impl Inventory {
    pub fn len(&self) -> usize {
        self.switches.len() + self.access_points.len() + self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions a device listing, keeping the listing order inside each group.
/// Devices of any other product type are dropped.
pub fn classify(devices: Vec<Device>) -> Inventory {
    let mut inventory = Inventory::default();

    for device in devices {
        match device.product_type {
            ProductType::Switch => inventory.switches.push(device),
            ProductType::Wireless => inventory.access_points.push(device),
            ProductType::Camera => inventory.cameras.push(device),
            ProductType::Other => {}
        }
    }

    inventory
}
