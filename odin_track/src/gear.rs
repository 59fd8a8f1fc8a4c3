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

//! landing gear state. Gear position is a continuous value (0: retracted, 1: extended) that follows a
//! discrete target with hysteresis, and is blended in time whenever the target changes

use serde::Serialize;
use odin_common::{lerp, clamp01, easing::ease_in_out_cubic, datetime::EpochMillis};
use crate::config::GearConfig;

pub const RETRACTED: f64 = 0.0;
pub const EXTENDED: f64 = 1.0;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GearInput {
    pub is_on_ground: bool,

    /// height above ground in ft
    pub agl: f64,

    /// ft/min, negative is descending
    pub vertical_rate: f64,
}

/// the hysteresis rules. If none applies the `prior` target is kept
pub fn gear_target (input: &GearInput, prior: f64, config: &GearConfig)->f64 {
    if input.is_on_ground {
        EXTENDED
    } else if input.agl < config.extend_altitude_ft && input.vertical_rate < -config.descent_rate_threshold {
        EXTENDED
    } else if input.agl > config.retract_altitude_ft && input.vertical_rate > config.climb_rate_threshold {
        RETRACTED
    } else if input.agl < config.retract_altitude_ft {
        EXTENDED
    } else {
        prior
    }
}

#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct GearAnimationState {
    progress: f64,
    target_progress: f64,
    transition_start_time: Option<EpochMillis>,
    transition_start_progress: f64,
    is_transitioning: bool,
}

impl GearAnimationState {
    /// state of a newly observed aircraft. Aircraft that are clearly cruising start retracted, everything
    /// else starts extended unless the rules say otherwise. There is no initial transition
    pub fn initial (input: &GearInput, config: &GearConfig)->Self {
        let target = if input.is_on_ground {
            EXTENDED
        } else {
            let prior = if input.agl >= config.cruise_altitude_ft { RETRACTED } else { EXTENDED };
            gear_target( input, prior, config)
        };

        GearAnimationState {
            progress: target,
            target_progress: target,
            transition_start_time: None,
            transition_start_progress: target,
            is_transitioning: false
        }
    }

    pub fn progress (&self)->f64 { clamp01( self.progress) }
    pub fn target_progress (&self)->f64 { clamp01( self.target_progress) }
    pub fn is_transitioning (&self)->bool { self.is_transitioning }

    /// advance the blend to `now`, then re-evaluate the target. A target change while blending starts
    /// the new blend from the current (mid-blend) progress. Returns the new progress
    pub fn update (&mut self, input: &GearInput, now: EpochMillis, config: &GearConfig)->f64 {
        self.advance( now, config);

        let target = gear_target( input, self.target_progress, config);
        if target != self.target_progress {
            self.target_progress = target;
            self.transition_start_time = Some(now);
            self.transition_start_progress = self.progress;
            self.is_transitioning = self.progress != target;
        }

        self.progress()
    }

    fn advance (&mut self, now: EpochMillis, config: &GearConfig) {
        if !self.is_transitioning { return }

        if let Some(start) = self.transition_start_time {
            let f = clamp01( now.secs_since( start) / config.transition_time_secs);
            if f >= 1.0 {
                self.progress = self.target_progress;
                self.is_transitioning = false;
            } else {
                self.progress = clamp01( lerp( self.transition_start_progress, self.target_progress, ease_in_out_cubic(f)));
            }
        }
    }
}
