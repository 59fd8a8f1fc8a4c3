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

//! nose-up pitch bias of aircraft that are about to touch down

use odin_common::easing::smoothstep;
use crate::config::FlareConfig;

/// returns the flare pitch (deg) if the aircraft qualifies, None otherwise.
/// `agl` is in ft, `vertical_rate` in ft/min (negative is descending) and `groundspeed` in knots
pub fn apply_flare (pitch: f64, agl: f64, vertical_rate: f64, groundspeed: f64, intensity: f64, config: &FlareConfig)->Option<f64> {
    if !config.enabled || !is_flaring( agl, vertical_rate, groundspeed, config) { return None }

    let f = flare_factor( agl, config);
    let target = config.target_pitch_deg * intensity;
    Some( pitch + (target - pitch) * f)
}

/// are we in the flare window
pub fn is_flaring (agl: f64, vertical_rate: f64, groundspeed: f64, config: &FlareConfig)->bool {
    vertical_rate < -config.min_descent_rate
        && groundspeed >= config.min_groundspeed_kn
        && agl < config.start_agl_ft
}

/// eased blend factor, 0 at start_agl_ft and 1 at or below end_agl_ft
pub fn flare_factor (agl: f64, config: &FlareConfig)->f64 {
    let span = config.start_agl_ft - config.end_agl_ft;
    if span > 0.0 {
        smoothstep( (config.start_agl_ft - agl) / span)
    } else {
        1.0
    }
}
