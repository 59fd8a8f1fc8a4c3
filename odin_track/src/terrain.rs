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

//! terrain aware height correction. Aircraft are either clamped to the ground or flying, switching between
//! the two is blended over a few display frames so that there is no visible height jump.
//!
//! All heights are meters in the renderer datum (reported MSL altitude plus `height_datum_offset_m`)

use std::sync::Arc;
use dashmap::{DashMap, DashSet};
use tracing::{debug, warn};
use odin_common::{lerp, clamp01, easing::smoothstep};
use odin_dem::TerrainSampler;

use crate::{config::TerrainConfig, snapshot::Callsign};

/// progress values above this are considered complete
const PROGRESS_EPS: f64 = 1e-9;

/// ground classification. The second condition keeps aircraft that are still faster than the ground speed
/// threshold from sinking into the terrain during the landing roll
pub fn should_clamp (groundspeed: f64, sample: Option<f64>, reported_height: f64, config: &TerrainConfig)->bool {
    groundspeed < config.ground_speed_threshold_kn
        || sample.is_some_and( |h| h + config.ground_offset_m > reported_height)
}

/// does this aircraft need terrain samples
pub fn needs_sample (groundspeed: f64, reported_height: f64, reference_elevation: f64, config: &TerrainConfig)->bool {
    groundspeed < config.ground_speed_threshold_kn
        || (reported_height - reference_elevation) < config.sample_altitude_agl_m()
}

/// eased height blend between ground and air
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TerrainTransition {
    pub source_height: f64,
    pub target_height: f64,
    progress: f64,
}

impl TerrainTransition {
    pub fn new (source_height: f64, target_height: f64)->Self {
        TerrainTransition { source_height, target_height, progress: 0.0 }
    }

    pub fn progress (&self)->f64 { clamp01( self.progress) }

    pub fn is_complete (&self)->bool { self.progress() > 1.0 - PROGRESS_EPS }

    pub fn advance (&mut self, delta: f64) { self.progress = clamp01( self.progress + delta) }

    pub fn height (&self)->f64 {
        if self.is_complete() {
            self.target_height
        } else {
            lerp( self.source_height, self.target_height, smoothstep( self.progress()))
        }
    }
}

/// per tick input of the terrain correction
#[derive(Debug,Clone,Copy)]
pub struct TerrainInput {
    /// interpolated altitude converted into the renderer datum
    pub reported_height: f64,

    /// knots
    pub groundspeed: f64,

    /// cached terrain height below the aircraft, if any
    pub sample: Option<f64>,

    /// fallback ground elevation
    pub reference_elevation: f64,
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TerrainOutput {
    pub height: f64,
    pub is_clamped: bool,
}

/// the terrain correction state we keep per aircraft
#[derive(Debug,Clone,Default)]
pub struct TerrainRecord {
    is_clamped: Option<bool>,
    smoothed_ground: Option<f64>,
    last_height: Option<f64>,
    transition: Option<TerrainTransition>,
}

impl TerrainRecord {
    pub fn transition (&self)->Option<&TerrainTransition> { self.transition.as_ref() }
    pub fn is_clamped (&self)->Option<bool> { self.is_clamped }
    pub fn last_height (&self)->Option<f64> { self.last_height }

    /// compute the corrected height. Frame based state (ground smoothing and transition progress) is only
    /// changed if `advance` is set, i.e. if time has moved since the last call
    pub fn correct (&mut self, input: &TerrainInput, config: &TerrainConfig, advance: bool)->TerrainOutput {
        let is_clamped = should_clamp( input.groundspeed, input.sample, input.reported_height, config);

        let target = if is_clamped {
            match input.sample {
                Some(sample) => {
                    let ground = match self.smoothed_ground {
                        Some(h) if advance => h + config.smoothing_factor * (sample - h),
                        Some(h) => h,
                        None => sample // first sample seeds the running value
                    };
                    self.smoothed_ground = Some(ground);
                    ground + config.ground_offset_m
                }
                None => input.reported_height.max( input.reference_elevation) + config.ground_offset_m
            }
        } else {
            self.smoothed_ground = None;
            input.reported_height + config.flying_offset_m
        };

        if let (Some(was_clamped), Some(last_height)) = (self.is_clamped, self.last_height) {
            if was_clamped != is_clamped {
                self.transition = Some( TerrainTransition::new( last_height, target));
            }
        }
        self.is_clamped = Some(is_clamped);

        let height = if let Some(tr) = &mut self.transition {
            tr.target_height = target;
            if advance { tr.advance( 1.0 / config.transition_frames.max(1) as f64) }
            let h = tr.height();
            if tr.is_complete() { self.transition = None }
            h
        } else {
            target
        };

        self.last_height = Some(height);
        TerrainOutput { height, is_clamped }
    }
}

/// terrain samples shared between the engine (reader) and async sample requests (writers)
#[derive(Debug,Clone,Default)]
pub struct TerrainCache {
    samples: Arc<DashMap<Callsign,f64>>,
    in_flight: Arc<DashSet<Callsign>>,
}

impl TerrainCache {
    pub fn new ()->Self { TerrainCache::default() }

    pub fn sample (&self, callsign: &str)->Option<f64> { self.samples.get( callsign).map( |e| *e.value()) }

    pub fn insert (&self, callsign: Callsign, height: f64) { self.samples.insert( callsign, height); }

    pub fn is_in_flight (&self, callsign: &str)->bool { self.in_flight.contains( callsign) }

    pub fn len (&self)->usize { self.samples.len() }
    pub fn n_in_flight (&self)->usize { self.in_flight.len() }

    /// drop samples and in-flight marks of callsigns that are not accepted by `keep`
    pub fn retain<F> (&self, keep: F) where F: Fn(&str)->bool {
        self.samples.retain( |cs,_| keep(cs));
        self.in_flight.retain( |cs| keep(cs));
    }

    /// create a batch for all candidates that are not already in flight, marking them as in flight
    pub fn request (&self, candidates: Vec<(Callsign,(f64,f64))>)->Option<TerrainBatch> {
        let mut callsigns = Vec::with_capacity( candidates.len());
        let mut points = Vec::with_capacity( candidates.len());

        for (cs,pt) in candidates {
            if self.in_flight.insert( cs.clone()) {
                callsigns.push( cs);
                points.push( pt);
            }
        }

        if callsigns.is_empty() {
            None
        } else {
            Some( TerrainBatch { callsigns, points, cache: self.clone() })
        }
    }
}

/// one batched terrain height request. Running it never fails - errors are logged and only clear the in-flight marks
#[derive(Debug)]
pub struct TerrainBatch {
    pub callsigns: Vec<Callsign>,
    pub points: Vec<(f64,f64)>,
    cache: TerrainCache,
}

impl TerrainBatch {
    pub fn len (&self)->usize { self.callsigns.len() }

    /// query the sampler and merge results into the cache. Results for aircraft that were purged while
    /// the request was pending are dropped. Returns the number of merged samples
    pub async fn run (self, sampler: &dyn TerrainSampler)->usize {
        match sampler.sample_heights( &self.points).await {
            Ok(heights) => {
                let n_heights = heights.len();
                if n_heights != self.callsigns.len() {
                    warn!("terrain sampler returned {} heights for {} points", n_heights, self.callsigns.len());
                }

                let mut n_merged = 0;
                for (cs,h) in self.callsigns.iter().zip( heights.into_iter()) {
                    if self.cache.in_flight.remove( cs).is_some() {
                        self.cache.samples.insert( cs.clone(), h);
                        n_merged += 1;
                    }
                }
                for cs in self.callsigns.iter().skip( n_heights) { // no result, can be requested again
                    self.cache.in_flight.remove( cs);
                }
                debug!("merged {} of {} terrain samples", n_merged, self.callsigns.len());
                n_merged
            }
            Err(e) => {
                warn!("terrain sampling for {} aircraft failed: {}", self.callsigns.len(), e);
                self.abandon();
                0
            }
        }
    }

    /// clear the in-flight marks without results
    pub fn abandon (&self) {
        for cs in &self.callsigns { self.cache.in_flight.remove( cs); }
    }
}
