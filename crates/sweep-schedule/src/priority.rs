//! Per-room priority score.
//!
//! ```text
//! P = A · (w_E · E) · max(0, 1 + λ · D)
//! ```
//!
//! | Symbol | Meaning                                   | Source                       |
//! |--------|-------------------------------------------|------------------------------|
//! | `A`    | 1 if a responder can reach the room, else 0 | pathfinder flood           |
//! | `E`    | occupants still in the room               | `Occupancy`                  |
//! | `D`    | mean cell danger of the room, in [0, 1]   | `HazardField::room_danger`   |
//! | `w_E`  | `priority.occupant_weight`                | config                       |
//! | `λ`    | `priority.danger_weight`                  | config, any sign             |
//!
//! `λ > 0` sends responders to dangerous rooms first (the occupants there
//! have the least time left); `λ < 0` prefers safe rooms that can be emptied
//! quickly.  With `λ <= -1` a fully involved room scores zero.

use sweep_core::PriorityConfig;

/// Priority of one room.  Zero when the room is inaccessible or empty.
pub fn priority(cfg: &PriorityConfig, accessible: bool, remaining: u32, danger: f32) -> f32 {
    if !accessible || remaining == 0 {
        return 0.0;
    }
    let danger_factor = (1.0 + cfg.danger_weight * danger.clamp(0.0, 1.0)).max(0.0);
    cfg.occupant_weight * remaining as f32 * danger_factor
}
