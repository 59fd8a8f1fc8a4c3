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

//! heading arithmetic for interpolating directions. All values are degrees

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/// result is in [0,360). Tiny negative inputs would round up to 360.0, which is mapped to 0
#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 {
        let y = 360.0 + x;
        if y >= 360.0 { 0.0 } else { y }
    } else { x }
}

/// signed delta along the shorter arc from `from` to `to`, in [-180,180]
/// e.g. `shortest_delta(350.0, 10.0) == 20.0` and `shortest_delta(10.0, 350.0) == -20.0`
#[inline]
pub fn shortest_delta (from: f64, to: f64) -> f64 {
    normalize_180( to - from)
}

/// interpolate (or extrapolate for t>1) a heading along the shorter arc. Result is in [0,360)
#[inline]
pub fn lerp_heading (from: f64, to: f64, t: f64) -> f64 {
    normalize_360( from + shortest_delta( from, to) * t)
}
