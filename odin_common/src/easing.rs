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

//! easing curves for display blends. Inputs are clamped to [0,1]

use crate::clamp01;

/// cubic ease-in-out (slow start, slow end)
pub fn ease_in_out_cubic (t: f64)->f64 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// cubic ease-out (fast start, slow end)
pub fn ease_out_cubic (t: f64)->f64 {
    let u = 1.0 - clamp01(t);
    1.0 - u * u * u
}

/// Hermite smoothstep
pub fn smoothstep (t: f64)->f64 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}
