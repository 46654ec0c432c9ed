use serde::{Deserialize, Serialize};

use crate::models::VehicleType;

/// A transfer option on the taxi screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleOption {
    pub vehicle_type: VehicleType,
    pub passengers: u8,
    pub price: String,
    pub eta_minutes: u32,
    pub recommended: bool,
}

impl VehicleOption {
    /// Options offered for every airport transfer
    pub fn fleet() -> Vec<VehicleOption> {
        vec![
            VehicleOption {
                vehicle_type: VehicleType::Standard,
                passengers: 3,
                price: "£45".to_string(),
                eta_minutes: 15,
                recommended: true,
            },
            VehicleOption {
                vehicle_type: VehicleType::Premium,
                passengers: 3,
                price: "£65".to_string(),
                eta_minutes: 12,
                recommended: false,
            },
            VehicleOption {
                vehicle_type: VehicleType::Xl,
                passengers: 6,
                price: "£85".to_string(),
                eta_minutes: 18,
                recommended: false,
            },
        ]
    }

    pub fn find(vehicle_type: VehicleType) -> Option<VehicleOption> {
        Self::fleet().into_iter().find(|v| v.vehicle_type == vehicle_type)
    }

    pub fn capacity_label(&self) -> String {
        format!("{} passengers", self.passengers)
    }

    pub fn eta_label(&self) -> String {
        format!("{} min away", self.eta_minutes)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Crowding {
    Quiet,
    Moderate,
    Busy,
}

/// A Priority Pass lounge on the lounge screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoungeOption {
    pub name: String,
    pub terminal: String,
    pub walk_minutes_from_gate: u32,
    pub amenities: String,
    pub crowding: Crowding,
}

impl LoungeOption {
    /// Lounges available at the trip's terminal
    pub fn at_terminal(terminal: &str) -> Vec<LoungeOption> {
        let lounge = |name: &str, walk: u32, amenities: &str, crowding: Crowding| LoungeOption {
            name: name.to_string(),
            terminal: terminal.to_string(),
            walk_minutes_from_gate: walk,
            amenities: amenities.to_string(),
            crowding,
        };

        vec![
            lounge("Plaza Premium Lounge", 5, "Showers, Hot meals, WiFi", Crowding::Moderate),
            lounge("No.1 Traveller", 3, "Bar, Snacks, WiFi", Crowding::Busy),
            lounge("SkyTeam Lounge", 8, "Spa, Full dining, Business center", Crowding::Quiet),
        ]
    }

    pub fn distance_label(&self) -> String {
        format!("{} min walk from gate", self.walk_minutes_from_gate)
    }
}
