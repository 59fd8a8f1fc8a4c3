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

pub mod macros;
pub mod angle;
pub mod datetime;
pub mod uom;
pub mod easing;
pub mod ron;
pub mod net;

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }
#[inline(always)] pub fn abs(x:f64) -> f64 { x.abs() }
#[inline(always)] pub fn deg(x:f64)->f64 { x.to_degrees() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

/// clamp to the unit interval. NaN inputs are mapped to 0
#[inline]
pub fn clamp01 (x: f64)->f64 {
    if x.is_nan() { 0.0 } else { x.clamp( 0.0, 1.0) }
}

/// linear interpolation between `a` and `b`. Note `t` is not clamped so this also extrapolates
#[inline]
pub fn lerp (a: f64, b: f64, t: f64)->f64 {
    a + (b - a) * t
}

/// standard gravity in m/s²
pub const G0: f64 = 9.80665;
