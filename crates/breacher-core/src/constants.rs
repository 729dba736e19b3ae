//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 10;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Time control ---

/// Lowest accepted time scale (0 = hold).
pub const TIME_SCALE_MIN: f64 = 0.0;

/// Highest accepted time scale.
pub const TIME_SCALE_MAX: f64 = 4.0;

// --- Combat resolution ---

/// Hit chance floor after all modifiers.
pub const HIT_CHANCE_MIN: f64 = 0.10;

/// Hit chance ceiling after all modifiers.
pub const HIT_CHANCE_MAX: f64 = 0.95;

/// Accuracy lost at exactly weapon range (scales linearly with distance).
pub const RANGE_PENALTY: f64 = 0.25;

/// Hit chance reduction behind low cover.
pub const COVER_REDUCTION_LOW: f64 = 0.15;

/// Hit chance reduction behind half cover.
pub const COVER_REDUCTION_HALF: f64 = 0.30;

/// Hit chance reduction behind high cover.
pub const COVER_REDUCTION_HIGH: f64 = 0.45;

/// Minimum damage dealt by any hit after armor.
pub const DAMAGE_FLOOR: i32 = 1;

// --- Suppression ---

/// Rounds expended by a targeted suppressive burst.
pub const SUPPRESS_AMMO_COST: u32 = 3;

/// Accuracy factor applied to a suppressive burst.
pub const SUPPRESS_ACCURACY_FACTOR: f64 = 0.6;

/// A suppressive miss within this margin of the hit chance counts as a near miss.
pub const SUPPRESS_NEAR_MISS_MARGIN: f64 = 0.15;

/// Chance a suppressive near miss pins the target. Hits always pin.
pub const SUPPRESS_PIN_CHANCE_NEAR: f64 = 0.75;

/// Chance a suppressive far miss pins the target.
pub const SUPPRESS_PIN_CHANCE_FAR: f64 = 0.30;

/// Suppressed effect duration (ticks).
pub const SUPPRESS_DURATION_TICKS: u64 = 30;

/// Rounds expended by an area suppression burst.
pub const SUPPRESS_AREA_AMMO_COST: u32 = 6;

/// Radius of an area suppression burst (tiles).
pub const SUPPRESS_AREA_RADIUS: f64 = 3.0;

/// Base pin chance at the center of an area burst; falls off linearly to the edge.
pub const SUPPRESS_AREA_BASE_CHANCE: f64 = 0.6;

// --- Effect modifiers ---

/// Movement speed multiplier while suppressed.
pub const SUPPRESSED_MOVE_FACTOR: f64 = 0.5;

/// Flat accuracy penalty while suppressed.
pub const SUPPRESSED_ACCURACY_PENALTY: f64 = 0.4;

/// Movement speed multiplier while stimmed.
pub const STIM_MOVE_FACTOR: f64 = 1.3;

/// Fire rate multiplier while stimmed.
pub const STIM_FIRE_RATE_FACTOR: f64 = 1.25;

/// Flat accuracy bonus while stimmed.
pub const STIM_ACCURACY_BONUS: f64 = 0.10;

// --- Overwatch ---

/// Reaction shots granted when entering overwatch.
pub const OVERWATCH_CHARGES: u32 = 2;

/// Accuracy factor applied to reaction fire.
pub const OVERWATCH_ACCURACY_FACTOR: f64 = 0.7;

/// Half-angle of the overwatch cone (degrees).
pub const OVERWATCH_CONE_HALF_DEG: f64 = 45.0;

// --- Interaction channels ---

/// Ticks to hack open a locked door.
pub const CHANNEL_DOOR_HACK_TICKS: u32 = 30;

/// Ticks to hack a terminal.
pub const CHANNEL_TERMINAL_HACK_TICKS: u32 = 50;

/// Ticks to disable an armed hazard.
pub const CHANNEL_HAZARD_DISABLE_TICKS: u32 = 40;

/// Ticks to deliberately trigger an armed hazard.
pub const CHANNEL_HAZARD_TRIGGER_TICKS: u32 = 20;

/// Blast radius of a detonating hazard (tiles).
pub const HAZARD_RADIUS: f64 = 2.5;

/// Raw blast damage of a detonating hazard.
pub const HAZARD_DAMAGE: i32 = 50;

// --- Perception ---

/// Radius within which weapon fire is heard (tiles).
pub const HEARING_RADIUS: f64 = 12.0;

// --- Enemy behavior ---

/// HP fraction below which a raider stops charging and fires from where it stands.
pub const RAIDER_CHARGE_HP_FRAC: f64 = 0.4;

// --- Battle pacing ---

/// Ticks of Contact before the battle escalates to Pressure regardless of waves.
pub const PRESSURE_DELAY_TICKS: u64 = 450;

/// Living enemy count at or below which Pressure resolves.
pub const RESOLUTION_ENEMY_THRESHOLD: usize = 2;

/// Default delay between scheduled waves for rules the mission leaves implicit (ticks).
pub const WAVE_INTERVAL_TICKS: u64 = 300;

// --- Experience ---

/// XP for surviving the mission at all.
pub const XP_BASE: u32 = 10;

/// XP per kill.
pub const XP_PER_KILL: u32 = 25;

/// XP per landed shot.
pub const XP_PER_HIT: u32 = 2;

/// XP bonus for a mission that ends in victory.
pub const XP_VICTORY_BONUS: u32 = 25;

// --- Health thresholds ---

/// Fraction of max HP below which a surviving crew member reports Wounded.
pub const WOUNDED_HP_FRACTION: f64 = 0.5;

/// Fraction of max HP below which a surviving crew member picks up a flesh wound.
pub const FLESH_WOUND_HP_FRACTION: f64 = 0.25;
