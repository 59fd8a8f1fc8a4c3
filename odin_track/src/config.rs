/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! typed configuration of the interpolation engine. All thresholds are empirically tuned defaults,
//! not physical invariants. Configs are usually loaded from RON files, e.g.
//! ```ron
//! InterpConfig(
//!     orientation: ( intensity: 0.8 ),
//!     gear: ( extend_altitude_ft: 1800.0 ),
//! )
//! ```
//! missing fields are filled in from the respective `Default` impl

use std::{path::Path, time::Duration};
use serde::{Deserialize, Serialize};
use odin_common::{datetime::millis, uom::feet_to_meters};

use crate::errors::{OdinTrackError, Result, invalid_config};

pub const MAX_ORIENTATION_INTENSITY: f64 = 1.5;

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct InterpConfig {
    /// target tick interval of the update loop (display refresh rate)
    pub frame_interval: Duration,

    pub orientation: OrientationConfig,
    pub gear: GearConfig,
    pub flare: FlareConfig,
    pub terrain: TerrainConfig,
}

impl Default for InterpConfig {
    fn default()->Self {
        InterpConfig {
            frame_interval: millis(16), // ~60Hz
            orientation: OrientationConfig::default(),
            gear: GearConfig::default(),
            flare: FlareConfig::default(),
            terrain: TerrainConfig::default(),
        }
    }
}

/// pitch/roll estimation from segment physics
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct OrientationConfig {
    pub enabled: bool,

    /// scale factor for estimated pitch and bank, valid range [0.0 ..= 1.5]
    pub intensity: f64,

    /// absolute pitch limit in degrees (0 ..= 90)
    pub max_pitch_deg: f64,

    /// absolute bank limit in degrees (0 ..= 90)
    pub max_bank_deg: f64,

    /// time constant (sec) of the exponential turn rate decay during extrapolation (> 0)
    pub turn_rate_decay_secs: f64,
}

impl Default for OrientationConfig {
    fn default()->Self {
        OrientationConfig {
            enabled: true,
            intensity: 1.0,
            max_pitch_deg: 15.0,
            max_bank_deg: 30.0,
            turn_rate_decay_secs: 3.0,
        }
    }
}

/// landing gear hysteresis thresholds. Altitudes are AGL, rates are positive magnitudes in ft/min
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct GearConfig {
    /// descending below this altitude extends the gear (> retract_altitude_ft)
    pub extend_altitude_ft: f64,

    /// climbing above this altitude retracts the gear, below it the gear is always down (>= 0)
    pub retract_altitude_ft: f64,

    /// aircraft first seen at or above this altitude start with retracted gear
    pub cruise_altitude_ft: f64,

    /// minimum sink rate that counts as descending (>= 0)
    pub descent_rate_threshold: f64,

    /// minimum climb rate that counts as climbing (>= 0)
    pub climb_rate_threshold: f64,

    /// duration of a full extend/retract animation in seconds (> 0)
    pub transition_time_secs: f64,
}

impl Default for GearConfig {
    fn default()->Self {
        GearConfig {
            extend_altitude_ft: 2000.0,
            retract_altitude_ft: 300.0,
            cruise_altitude_ft: 10000.0,
            descent_rate_threshold: 300.0,
            climb_rate_threshold: 300.0,
            transition_time_secs: 8.0,
        }
    }
}

/// nose-up pitch bias before touchdown
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct FlareConfig {
    pub enabled: bool,

    /// AGL at which the flare starts to blend in (> end_agl_ft)
    pub start_agl_ft: f64,

    /// AGL at which the flare pitch is fully reached (>= 0)
    pub end_agl_ft: f64,

    /// nose-up pitch (degrees) at full flare, scaled by orientation intensity
    pub target_pitch_deg: f64,

    /// minimum sink rate in ft/min for the flare to be active
    pub min_descent_rate: f64,

    /// minimum groundspeed in knots for the flare to be active
    pub min_groundspeed_kn: f64,
}

impl Default for FlareConfig {
    fn default()->Self {
        FlareConfig {
            enabled: true,
            start_agl_ft: 50.0,
            end_agl_ft: 10.0,
            target_pitch_deg: 4.0,
            min_descent_rate: 100.0,
            min_groundspeed_kn: 40.0,
        }
    }
}

/// terrain clamping and ground/air transition smoothing. Heights are in the renderer datum
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// aircraft slower than this (knots) are always clamped to the ground
    pub ground_speed_threshold_kn: f64,

    /// aircraft below this height (ft) above the reference elevation get terrain samples
    pub sample_altitude_agl_ft: f64,

    /// minimum interval between batched terrain requests
    pub sample_interval: Duration,

    /// vertical bias of clamped aircraft (m) to avoid surface z-fighting
    pub ground_offset_m: f64,

    /// fixed correction added to airborne heights (m)
    pub flying_offset_m: f64,

    /// offset that converts reported MSL altitude into the renderer height datum (m)
    pub height_datum_offset_m: f64,

    /// fallback ground elevation of the active location (m, renderer datum)
    pub reference_elevation_m: f64,

    /// per-frame blend factor of new terrain samples into the running ground height (0 < f <= 1)
    pub smoothing_factor: f64,

    /// number of display frames of a ground/air transition blend (>= 1)
    pub transition_frames: u32,
}

impl Default for TerrainConfig {
    fn default()->Self {
        TerrainConfig {
            ground_speed_threshold_kn: 40.0,
            sample_altitude_agl_ft: 500.0,
            sample_interval: millis(2000),
            ground_offset_m: 0.5,
            flying_offset_m: 0.0,
            height_datum_offset_m: 0.0,
            reference_elevation_m: 0.0,
            smoothing_factor: 0.2,
            transition_frames: 7,
        }
    }
}

impl TerrainConfig {
    pub fn sample_altitude_agl_m (&self)->f64 { feet_to_meters( self.sample_altitude_agl_ft) }
}

impl InterpConfig {
    /// check documented value ranges
    pub fn validate (&self)->Result<()> {
        let o = &self.orientation;
        if !(0.0..=MAX_ORIENTATION_INTENSITY).contains(&o.intensity) {
            return Err( invalid_config!("orientation intensity {} not in [0,{}]", o.intensity, MAX_ORIENTATION_INTENSITY))
        }
        if !(0.0..=90.0).contains(&o.max_pitch_deg) || !(0.0..=90.0).contains(&o.max_bank_deg) {
            return Err( invalid_config!("orientation limits out of range [0,90]"))
        }
        if !(o.turn_rate_decay_secs > 0.0) {
            return Err( invalid_config!("turn_rate_decay_secs has to be positive: {}", o.turn_rate_decay_secs))
        }

        let g = &self.gear;
        if !(g.retract_altitude_ft >= 0.0 && g.extend_altitude_ft > g.retract_altitude_ft) {
            return Err( invalid_config!("gear needs 0 <= retract_altitude_ft < extend_altitude_ft ({} / {})", g.retract_altitude_ft, g.extend_altitude_ft))
        }
        if g.descent_rate_threshold < 0.0 || g.climb_rate_threshold < 0.0 {
            return Err( invalid_config!("gear rate thresholds have to be positive magnitudes"))
        }
        if !(g.transition_time_secs > 0.0) {
            return Err( invalid_config!("gear transition_time_secs has to be positive: {}", g.transition_time_secs))
        }

        let f = &self.flare;
        if !(f.end_agl_ft >= 0.0 && f.start_agl_ft > f.end_agl_ft) {
            return Err( invalid_config!("flare needs 0 <= end_agl_ft < start_agl_ft ({} / {})", f.end_agl_ft, f.start_agl_ft))
        }

        let t = &self.terrain;
        if !(t.smoothing_factor > 0.0 && t.smoothing_factor <= 1.0) {
            return Err( invalid_config!("terrain smoothing_factor {} not in (0,1]", t.smoothing_factor))
        }
        if t.transition_frames == 0 {
            return Err( invalid_config!("terrain transition_frames has to be >= 1"))
        }
        if self.frame_interval.is_zero() {
            return Err( invalid_config!("frame_interval can't be zero"))
        }

        Ok(())
    }
}

/// load and validate a RON config file
pub fn load_config<P: AsRef<Path>> (path: P)->Result<InterpConfig> {
    let config: InterpConfig = odin_common::ron::load_config( path)?;
    config.validate()?;
    Ok(config)
}
