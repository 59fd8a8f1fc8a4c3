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

//! position and orientation estimation for a single aircraft between two snapshots.
//!
//! Display time runs one segment behind the data: the segment `previous -> current` is played back
//! during `[current.timestamp, current.timestamp + segment_duration]`, i.e. progress `t=0` shows the
//! previous and `t=1` the current snapshot. If no new snapshot arrives in time we extrapolate up to
//! [`MAX_EXTRAPOLATION`] and then freeze

use odin_common::{
    lerp, deg, rad, G0,
    angle::{lerp_heading, normalize_360},
    datetime::EpochMillis,
    uom::{fpm_to_mps, knots_to_mps},
};

use crate::{config::OrientationConfig, snapshot::Snapshot, state::SegmentPhysics};

/// upper bound of the normalized segment progress. Beyond this the position does not change anymore
pub const MAX_EXTRAPOLATION: f64 = 1.2;

/// lower speed bound (m/s) for flight path angle computation, to avoid extreme pitch at low speed
const MIN_PITCH_SPEED: f64 = 30.0;

/// the kinematic estimate before terrain correction. Altitude is still meters MSL
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct RawState {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub groundspeed: f64,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,

    /// normalized segment progress in [0, MAX_EXTRAPOLATION]
    pub progress: f64,
    pub is_extrapolated: bool,
}

/// normalized progress within the `previous -> current` segment, or None if there is no valid segment
/// (no previous snapshot, or previous is not older than current)
pub fn segment_progress (previous: &Snapshot, current: &Snapshot, now: EpochMillis)->Option<f64> {
    if previous.timestamp < current.timestamp {
        let segment_secs = current.timestamp.secs_since( previous.timestamp);
        let t = now.secs_since( current.timestamp) / segment_secs;
        Some( t.clamp( 0.0, MAX_EXTRAPOLATION))
    } else {
        None
    }
}

/// heading offset (deg) after extrapolating `secs` seconds with a turn rate (deg/s) that decays
/// exponentially with time constant `tau`. This is the integral of `rate * exp(-s/tau)` over [0,secs]
pub fn decayed_turn (rate: f64, tau: f64, secs: f64)->f64 {
    if tau > 0.0 && secs > 0.0 {
        rate * tau * (1.0 - (-secs / tau).exp())
    } else {
        0.0
    }
}

/// compute the raw interpolated (or extrapolated) state of an aircraft.
/// `segment` holds the vertical and turn rate that are used for orientation, they are owned by the caller
/// and only change when new snapshots arrive
pub fn interpolate (previous: Option<&Snapshot>, current: &Snapshot, now: EpochMillis,
                    config: &OrientationConfig, segment: &SegmentPhysics) -> RawState {
    let segment_and_progress = previous.and_then( |prev| segment_progress( prev, current, now).map( |t| (prev,t)));

    match segment_and_progress {
        Some((prev,t)) => {
            let segment_secs = current.timestamp.secs_since( prev.timestamp);
            let latitude = lerp( prev.latitude, current.latitude, t);
            let longitude = lerp( prev.longitude, current.longitude, t);
            let altitude = lerp( prev.altitude, current.altitude, t);
            let groundspeed = lerp( prev.groundspeed, current.groundspeed, t).max(0.0);

            let (heading, turn_rate) = if t <= 1.0 {
                (lerp_heading( prev.heading, current.heading, t), segment.turn_rate)
            } else {
                let tau = config.turn_rate_decay_secs;
                let x = (t - 1.0) * segment_secs;
                let heading = normalize_360( current.heading + decayed_turn( segment.turn_rate, tau, x));
                (heading, segment.turn_rate * (-x / tau).exp())
            };

            let (pitch, roll) = estimate_orientation( groundspeed, segment.vertical_rate, turn_rate, config);
            RawState { latitude, longitude, altitude, groundspeed, heading, pitch, roll, progress: t, is_extrapolated: t > 1.0 }
        }
        None => { // nothing to interpolate - snap to current
            let (pitch, roll) = estimate_orientation( current.groundspeed, segment.vertical_rate, segment.turn_rate, config);
            RawState {
                latitude: current.latitude,
                longitude: current.longitude,
                altitude: current.altitude,
                groundspeed: current.groundspeed,
                heading: normalize_360( current.heading),
                pitch,
                roll,
                progress: 0.0,
                is_extrapolated: false
            }
        }
    }
}

/// pitch (deg) from flight path angle and roll (deg) from coordinated turn bank angle,
/// both scaled by intensity and clamped to the configured limits
pub fn estimate_orientation (groundspeed: f64, vertical_rate: f64, turn_rate: f64, config: &OrientationConfig)->(f64,f64) {
    if !config.enabled { return (0.0,0.0) }

    let v = knots_to_mps( groundspeed);
    let vs = fpm_to_mps( vertical_rate);

    let pitch = deg( vs.atan2( v.max( MIN_PITCH_SPEED))) * config.intensity;
    let roll = deg( (v * rad( turn_rate) / G0).atan()) * config.intensity;

    ( limit( pitch, config.max_pitch_deg), limit( roll, config.max_bank_deg) )
}

/// symmetric clamp that does not panic on negative or NaN limits (those yield 0)
fn limit (v: f64, max: f64)->f64 {
    if max >= 0.0 { v.clamp( -max, max) } else { 0.0 }
}
