//! Synthetic identity generation for spawned vehicles

use rand::seq::IndexedRandom;
use rand::Rng;

use super::types::VehicleKind;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Plate layout: two letters, two digits, two letters, one digit
const PLATE_LAYOUT: [(&[u8], usize); 4] = [(LETTERS, 2), (DIGITS, 2), (LETTERS, 2), (DIGITS, 1)];

pub const PLATE_LEN: usize = 7;

/// Generate a random plate such as `KA05MX7`
pub fn generate_plate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut plate = String::with_capacity(PLATE_LEN);
    for (alphabet, count) in PLATE_LAYOUT {
        for _ in 0..count {
            plate.push(alphabet[rng.random_range(0..alphabet.len())] as char);
        }
    }
    plate
}

/// Pick a vehicle type uniformly
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> VehicleKind {
    *VehicleKind::ALL
        .choose(rng)
        .unwrap_or(&VehicleKind::Car)
}

/// Check that a string follows the plate layout
pub fn is_valid_plate(plate: &str) -> bool {
    let bytes = plate.as_bytes();
    if bytes.len() != PLATE_LEN {
        return false;
    }
    let mut i = 0;
    for (alphabet, count) in PLATE_LAYOUT {
        for _ in 0..count {
            if !alphabet.contains(&bytes[i]) {
                return false;
            }
            i += 1;
        }
    }
    true
}
