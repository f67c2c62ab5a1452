//! Vehicle list state for one search page render.

use super::Vehicle;

/// Search results and the vehicle the customer opened. Owned by the handler
/// that builds it; nothing is shared between requests.
#[derive(Debug, Clone, Default)]
pub struct VehicleStore {
    vehicles: Vec<Vehicle>,
    selected: Option<Vehicle>,
}

impl VehicleStore {
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn selected(&self) -> Option<&Vehicle> {
        self.selected.as_ref()
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
    }

    /// Select a listed vehicle by route key. Unknown keys clear the selection.
    pub fn select_vehicle(&mut self, key: &str) -> Option<&Vehicle> {
        self.selected = self
            .vehicles
            .iter()
            .find(|v| v.route_key() == key)
            .cloned();
        self.selected.as_ref()
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    pub fn remove_vehicle(&mut self, key: &str) {
        self.vehicles.retain(|v| v.route_key() != key);
        if self.selected.as_ref().is_some_and(|v| v.route_key() == key) {
            self.selected = None;
        }
    }
}
