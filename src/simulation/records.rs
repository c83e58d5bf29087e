//! Dashboard records derived from live vehicles

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::{LaneGroup, VehicleId, ALERT_ACTION};
use super::vehicle::SimVehicle;

/// A wrong-way alert raised when the vehicle enters the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: VehicleId,
    pub time: String,
    pub lane: LaneGroup,
    pub confidence: f32,
    pub plate: String,
    pub action: String,
}

impl AlertRecord {
    pub fn for_vehicle(vehicle: &SimVehicle, time: String) -> Self {
        Self {
            id: vehicle.id,
            time,
            lane: vehicle.lane.group,
            confidence: vehicle.detection_confidence,
            plate: vehicle.plate_for_alert().to_string(),
            action: ALERT_ACTION.to_string(),
        }
    }
}

/// An entry in the recent detections table; this is the exported format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    pub id: VehicleId,
    pub time: String,
    pub vehicle_type: String,
    pub license_plate: String,
    pub confidence: f32,
    pub status: String,
}

impl DetectionRecord {
    pub fn for_vehicle(vehicle: &SimVehicle, time: String) -> Self {
        Self {
            id: vehicle.id,
            time,
            vehicle_type: vehicle.kind.label().to_string(),
            license_plate: vehicle.plate_or_placeholder().to_string(),
            confidence: vehicle.detection_confidence,
            status: vehicle.status_label().to_string(),
        }
    }

    pub fn is_wrong_way(&self) -> bool {
        self.status == "Wrong Direction"
    }
}

/// Snapshot of one live vehicle for the active detections panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveDetection {
    pub id: VehicleId,
    pub is_wrong_way: bool,
    pub confidence: f32,
    pub lane: LaneGroup,
    pub plate: String,
    pub plate_confidence: f32,
}

impl LiveDetection {
    pub fn from_vehicle(vehicle: &SimVehicle) -> Self {
        Self {
            id: vehicle.id,
            is_wrong_way: vehicle.is_wrong_way,
            confidence: vehicle.detection_confidence,
            lane: vehicle.lane.group,
            plate: vehicle.plate_or_placeholder().to_string(),
            plate_confidence: vehicle.plate_confidence,
        }
    }

    /// Classification shown in the active detections panel
    pub fn kind_label(&self) -> &'static str {
        if self.is_wrong_way {
            "Wrong-Way"
        } else {
            "Normal"
        }
    }
}

/// A newest-first list that keeps at most `capacity` entries
#[derive(Debug, Clone)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, dropping the oldest entry when full
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest entry first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.iter().cloned().collect()
    }
}
