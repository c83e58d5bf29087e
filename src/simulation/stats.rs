//! Aggregate counters shown on the dashboard

/// Counters updated as vehicles spawn, plus the published FPS figure
#[derive(Debug, Clone, PartialEq)]
pub struct SimStats {
    /// Vehicles spawned since the last reset
    pub total_vehicles: usize,

    /// Spawned vehicles travelling against their lane
    pub wrong_way_vehicles: usize,

    /// Spawned vehicles whose plate the OCR stage read
    pub plates_recognized: usize,

    /// Fixed accuracy figure for display
    pub accuracy: f32,

    /// Ticks counted in the last complete FPS window
    pub fps: u32,
}

impl SimStats {
    pub fn new(accuracy: f32) -> Self {
        Self {
            total_vehicles: 0,
            wrong_way_vehicles: 0,
            plates_recognized: 0,
            accuracy,
            fps: 0,
        }
    }

    /// Record a freshly spawned vehicle
    pub fn record_spawn(&mut self, is_wrong_way: bool, plate_recognized: bool) {
        self.total_vehicles += 1;
        if is_wrong_way {
            self.wrong_way_vehicles += 1;
        }
        if plate_recognized {
            self.plates_recognized += 1;
        }
    }

    /// Zero every counter; accuracy is a constant and survives
    pub fn reset(&mut self) {
        *self = Self::new(self.accuracy);
    }

    /// Share of spawned vehicles driving the wrong way, as a percentage
    pub fn wrong_way_rate(&self) -> f32 {
        if self.total_vehicles == 0 {
            0.0
        } else {
            self.wrong_way_vehicles as f32 / self.total_vehicles as f32 * 100.0
        }
    }

    /// Share of spawned vehicles with a readable plate, as a percentage
    pub fn plate_read_rate(&self) -> f32 {
        if self.total_vehicles == 0 {
            0.0
        } else {
            self.plates_recognized as f32 / self.total_vehicles as f32 * 100.0
        }
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Wrong-Way: {} | Plates Read: {} | Accuracy: {}% | FPS: {}",
            self.total_vehicles,
            self.wrong_way_vehicles,
            self.plates_recognized,
            self.accuracy,
            self.fps
        )
    }
}
