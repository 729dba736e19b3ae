use serde::{Deserialize, Serialize};

use crate::engine::config::{self, InterceptorProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcPrediction {
    pub points: Vec<(f32, f32)>,
    pub time_to_target: f32,
    pub reaches_target: bool,
}

/// Predict the trajectory of an interceptor launched from (start_x, start_y)
/// aiming at (target_x, target_y). Pure physics computation — no ECS access.
///
/// Replicates the exact physics from thrust.rs, gravity.rs, drag.rs, wind.rs,
/// and detonation.rs to produce an accurate predicted path.
pub fn predict_arc(
    start_x: f32,
    start_y: f32,
    target_x: f32,
    target_y: f32,
    profile: &InterceptorProfile,
    wind_x: f32,
) -> ArcPrediction {
    let dx = target_x - start_x;
    let dy = target_y - start_y;
    let dist = (dx * dx + dy * dy).sqrt().max(1.0);
    let dir_x = dx / dist;
    let dir_y = dy / dist;

    // Initial velocity — matches input_system.rs
    let mut x = start_x;
    let mut y = start_y;
    let mut vx = dir_x * 10.0;
    let mut vy = dir_y * 10.0;
    let mut burn_remaining = profile.burn_time;

    let mut points = Vec::with_capacity(120);
    points.push((x, y));

    let max_steps = (10.0 / config::DT) as usize; // 10 seconds max
    let mut time = 0.0_f32;
    let mut reached_target = false;

    for _ in 0..max_steps {
        // Thrust — matches thrust.rs
        if burn_remaining > 0.0 {
            let tdx = target_x - x;
            let tdy = target_y - y;
            let tdist = (tdx * tdx + tdy * tdy).sqrt();
            if tdist > 1e-6 {
                let tdir_x = tdx / tdist;
                let tdir_y = tdy / tdist;
                let thrust_accel = profile.thrust * config::DT;
                vx += tdir_x * thrust_accel;
                vy += tdir_y * thrust_accel;
            } else {
                burn_remaining = 0.0;
            }
            burn_remaining -= config::DT;
            if burn_remaining < 0.0 {
                burn_remaining = 0.0;
            }
        }

        // Gravity — matches gravity.rs
        vy -= config::GRAVITY * config::DT;

        // Drag — matches drag.rs
        let speed_sq = vx * vx + vy * vy;
        let speed = speed_sq.sqrt();
        if speed > 1e-6 {
            let h = (y - config::GROUND_Y).max(0.0);
            let rho = config::AIR_DENSITY_SEA_LEVEL * (-h / config::ATMOSPHERE_SCALE_HEIGHT).exp();
            let drag_accel = 0.5 * rho * speed_sq * profile.drag_coeff
                * profile.cross_section
                / profile.mass;
            let drag_factor = (drag_accel * config::DT / speed).min(0.99);
            vx -= vx * drag_factor;
            vy -= vy * drag_factor;
        }

        // Wind — matches wind.rs
        if wind_x != 0.0 {
            let altitude = (y - config::GROUND_Y).max(0.0);
            let altitude_factor = altitude * config::WIND_ALTITUDE_FACTOR;
            vx += wind_x * altitude_factor * config::DT;
        }

        // Movement — matches movement.rs
        x += vx * config::DT;
        y += vy * config::DT;
        time += config::DT;

        points.push((x, y));

        // Target proximity check — matches detonation.rs
        let prox_dx = x - target_x;
        let prox_dy = y - target_y;
        let prox_dist_sq = prox_dx * prox_dx + prox_dy * prox_dy;
        if prox_dist_sq
            < config::INTERCEPTOR_DETONATION_PROXIMITY * config::INTERCEPTOR_DETONATION_PROXIMITY
        {
            reached_target = true;
            break;
        }

        // Overshoot check — matches detonation.rs
        if burn_remaining <= 0.0 {
            let to_target_x = target_x - x;
            let to_target_y = target_y - y;
            let dot = vx * to_target_x + vy * to_target_y;
            if dot < 0.0 {
                reached_target = true;
                break;
            }
        }

        // OOB / ground check
        if y <= config::GROUND_Y
            || !(-config::OOB_MARGIN..=config::WORLD_WIDTH + config::OOB_MARGIN).contains(&x)
            || y > config::WORLD_HEIGHT + config::OOB_MARGIN
        {
            break;
        }
    }

    ArcPrediction {
        points,
        time_to_target: time,
        reaches_target: reached_target,
    }
}
