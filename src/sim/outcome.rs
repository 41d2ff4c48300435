//! Weighted outcome selection

use rand::Rng;

use super::state::Face;

/// Draw a face; `heads_percent` (0-100) is the chance of heads
pub fn pick_face<R: Rng>(rng: &mut R, heads_percent: u8) -> Face {
    let p = f32::from(heads_percent.min(100)) / 100.0;
    if rng.random::<f32>() < p {
        Face::Heads
    } else {
        Face::Tails
    }
}
