use crate::engine::config;
use crate::state::wave_state::WaveDefinition;
use crate::state::weather::{WeatherCondition, WeatherState};

/// Compose a wave definition based on wave number, territory size, and weather.
/// More owned regions = more missiles (stretched defenses).
/// Storm/Severe weather increases missile count.
pub fn compose_wave(wave_number: u32, owned_region_count: u32, weather: &WeatherState) -> WaveDefinition {
    let territory_factor = 1.0 + (owned_region_count as f32 - 1.0) * 0.15;
    let base_missiles = config::WAVE_BASE_MISSILES as f32
        + (wave_number.saturating_sub(1) * config::WAVE_MISSILES_PER_LEVEL) as f32;
    let weather_mult = match weather.condition {
        WeatherCondition::Storm => config::STORM_MISSILE_MULT,
        WeatherCondition::Severe => config::SEVERE_MISSILE_MULT,
        _ => 1.0,
    };
    let missile_count = (base_missiles * territory_factor * weather_mult).ceil() as u32;

    let spawn_interval = config::WAVE_BASE_SPAWN_INTERVAL
        .saturating_sub(wave_number * 5)
        .max(30);

    let flight_time_min = (config::MISSILE_FLIGHT_TIME_MIN - wave_number as f32 * 0.3).max(3.0);
    let flight_time_max = (config::MISSILE_FLIGHT_TIME_MAX - wave_number as f32 * 0.5).max(5.0);

    // MIRVs appear starting at wave MIRV_FIRST_WAVE
    let (mirv_count, mirv_child_count) = if wave_number >= config::MIRV_FIRST_WAVE {
        let waves_past = wave_number - config::MIRV_FIRST_WAVE + 1;
        let count = waves_past.min(missile_count / 3).max(1);
        let children = if wave_number >= 35 { 5 } else { 3 };
        (count, children)
    } else {
        (0, 0)
    };

    WaveDefinition {
        missile_count,
        spawn_interval_ticks: spawn_interval,
        flight_time_min,
        flight_time_max,
        mirv_count,
        mirv_child_count,
    }
}
