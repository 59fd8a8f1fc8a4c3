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

//! the per tick composition of all estimation stages, and the owner of all per-aircraft records

use std::{collections::HashMap, sync::Arc};
use dashmap::mapref::entry::Entry;
use tokio::sync::broadcast;
use tracing::{debug, trace};
use odin_common::{datetime::EpochMillis, uom::meters_to_feet};

use crate::{
    config::InterpConfig,
    errors::Result,
    flare::apply_flare,
    gear::{GearAnimationState, GearInput},
    kinematic::{interpolate, RawState},
    snapshot::{Callsign, SnapshotFeed, SnapshotPair},
    state::{FleetChange, InterpolatedAircraftState, SegmentPhysics, SharedAircraftStates},
    terrain::{needs_sample, TerrainBatch, TerrainCache, TerrainInput, TerrainRecord},
};

const FLEET_CHANGE_QUEUE_LEN: usize = 64;

/// what happened during a tick
#[derive(Debug)]
pub struct TickReport {
    pub n_aircraft: usize,
    pub added: usize,
    pub removed: usize,

    /// terrain request that should be executed asynchronously, if one is due
    pub terrain_batch: Option<TerrainBatch>,
}

/// the synchronous core. Each `tick()` reads the latest snapshot set once, updates all records of aircraft
/// in that set and purges records of aircraft that are not in it anymore. The engine does not do any I/O,
/// terrain requests are returned as [`TerrainBatch`] objects that have to be run by the caller
pub struct InterpolationEngine {
    config: Arc<InterpConfig>,
    feed: SnapshotFeed,

    states: SharedAircraftStates,
    terrain_records: HashMap<Callsign,TerrainRecord>,
    gear_states: HashMap<Callsign,GearAnimationState>,
    terrain_cache: TerrainCache,

    reference_elevation: f64,
    last_tick: Option<EpochMillis>,
    last_sample_request: Option<EpochMillis>,

    tx: broadcast::Sender<FleetChange>,
}

impl InterpolationEngine {
    /// fails if `config` does not pass [`InterpConfig::validate`]
    pub fn new (config: InterpConfig, feed: SnapshotFeed)->Result<Self> {
        config.validate()?;
        let (tx,_) = broadcast::channel( FLEET_CHANGE_QUEUE_LEN);
        let reference_elevation = config.terrain.reference_elevation_m;

        Ok( InterpolationEngine {
            config: Arc::new(config),
            feed,
            states: SharedAircraftStates::new(),
            terrain_records: HashMap::new(),
            gear_states: HashMap::new(),
            terrain_cache: TerrainCache::new(),
            reference_elevation,
            last_tick: None,
            last_sample_request: None,
            tx
        })
    }

    pub fn config (&self)->&InterpConfig { self.config.as_ref() }

    /// read-only handle to the output states
    pub fn states (&self)->SharedAircraftStates { self.states.clone() }

    /// receiver for notifications about added or removed aircraft
    pub fn subscribe (&self)->broadcast::Receiver<FleetChange> { self.tx.subscribe() }

    pub fn terrain_cache (&self)->&TerrainCache { &self.terrain_cache }

    pub fn reference_elevation (&self)->f64 { self.reference_elevation }

    /// change the fallback ground elevation (e.g. when the viewer moves to another airport)
    pub fn set_reference_elevation (&mut self, elevation: f64) { self.reference_elevation = elevation }

    pub fn gear_state (&self, callsign: &str)->Option<&GearAnimationState> { self.gear_states.get( callsign) }
    pub fn terrain_record (&self, callsign: &str)->Option<&TerrainRecord> { self.terrain_records.get( callsign) }

    pub fn tick (&mut self, now: EpochMillis)->TickReport {
        let set = self.feed.latest();
        let config = self.config.clone();
        let advance = self.last_tick.is_none_or( |t| now > t);

        let mut added: Vec<Callsign> = Vec::new();
        let mut sample_candidates: Vec<(Callsign,(f64,f64))> = Vec::new();

        for (cs,pair) in set.iter() {
            let segment = self.segment_physics( cs, pair);
            let raw = interpolate( pair.previous.as_ref(), &pair.current, now, &config.orientation, &segment);

            let reported_height = raw.altitude + config.terrain.height_datum_offset_m;
            let sample = self.terrain_cache.sample( cs);
            let agl = meters_to_feet( self.agl( &raw, pair, reported_height, sample)).max(0.0);

            let mut pitch = raw.pitch;
            let mut roll = raw.roll;
            if config.orientation.enabled {
                if let Some(p) = apply_flare( pitch, agl, segment.vertical_rate, raw.groundspeed, config.orientation.intensity, &config.flare) {
                    pitch = p;
                }
            }

            let input = TerrainInput { reported_height, groundspeed: raw.groundspeed, sample, reference_elevation: self.reference_elevation };
            let terrain = self.terrain_records.entry( cs.clone()).or_default().correct( &input, &config.terrain, advance);
            if terrain.is_clamped { // no banking or nose down on the ground
                roll = 0.0;
                pitch = pitch.max(0.0);
            }

            if needs_sample( raw.groundspeed, reported_height, self.reference_elevation, &config.terrain) && !self.terrain_cache.is_in_flight( cs) {
                sample_candidates.push( (cs.clone(), (raw.longitude, raw.latitude)));
            }

            let gear_input = GearInput {
                is_on_ground: terrain.is_clamped,
                agl: if terrain.is_clamped { 0.0 } else { agl },
                vertical_rate: segment.vertical_rate
            };
            let gear_progress = match self.gear_states.get_mut( cs) {
                Some(gear) => gear.update( &gear_input, now, &config.gear),
                None => {
                    let gear = GearAnimationState::initial( &gear_input, &config.gear);
                    let progress = gear.progress();
                    self.gear_states.insert( cs.clone(), gear);
                    progress
                }
            };

            // update in place, new records only for new aircraft
            let mut state = match self.states.0.entry( cs.clone()) {
                Entry::Occupied(e) => e.into_ref(),
                Entry::Vacant(e) => {
                    added.push( cs.clone());
                    e.insert( InterpolatedAircraftState::new( cs.clone(), pair.current.aircraft_type.clone()))
                }
            };
            if state.aircraft_type != pair.current.aircraft_type {
                state.aircraft_type.clone_from( &pair.current.aircraft_type);
            }
            state.latitude = raw.latitude;
            state.longitude = raw.longitude;
            state.altitude = terrain.height;
            state.groundspeed = raw.groundspeed;
            state.heading = raw.heading;
            state.pitch = pitch;
            state.roll = roll;
            state.is_extrapolated = raw.is_extrapolated;
            state.is_on_ground = terrain.is_clamped;
            state.gear_progress = gear_progress;
            state.segment = segment;
        }

        // purge everything that is not in the latest set anymore
        let mut removed: Vec<Callsign> = Vec::new();
        self.states.0.retain( |cs,_| {
            let keep = set.contains( cs);
            if !keep { removed.push( cs.clone()) }
            keep
        });
        self.terrain_records.retain( |cs,_| set.contains( cs));
        self.gear_states.retain( |cs,_| set.contains( cs));
        self.terrain_cache.retain( |cs| set.contains( cs));

        let terrain_batch = self.terrain_request( now, sample_candidates);

        if advance { self.last_tick = Some(now) }

        let report = TickReport { n_aircraft: self.states.len(), added: added.len(), removed: removed.len(), terrain_batch };
        if !added.is_empty() || !removed.is_empty() {
            debug!("aircraft added: {:?}, removed: {:?}, now tracking {}", added, removed, report.n_aircraft);
            let _ = self.tx.send( FleetChange { added, removed, count: report.n_aircraft }); // no error if nobody listens
        }

        report
    }

    /// keep the segment physics of the last tick unless the current snapshot changed
    fn segment_physics (&self, cs: &str, pair: &SnapshotPair)->SegmentPhysics {
        let last = self.states.0.get( cs).map( |e| e.segment);
        match last {
            Some(segment) if segment.is_for( &pair.current) => segment,
            _ => SegmentPhysics::from_pair( pair.previous.as_ref(), &pair.current)
        }
    }

    /// height above ground (m) from the best source we have: terrain sample, reported AGL or reference elevation
    fn agl (&self, raw: &RawState, pair: &SnapshotPair, reported_height: f64, sample: Option<f64>)->f64 {
        if let Some(ground) = sample {
            reported_height - ground
        } else if let Some(agl) = pair.current.altitude_agl {
            agl + (raw.altitude - pair.current.altitude)
        } else {
            reported_height - self.reference_elevation
        }
    }

    fn terrain_request (&mut self, now: EpochMillis, candidates: Vec<(Callsign,(f64,f64))>)->Option<TerrainBatch> {
        if candidates.is_empty() { return None }

        let interval = self.config.terrain.sample_interval.as_secs_f64();
        if self.last_sample_request.is_some_and( |t| now.secs_since(t) < interval) { return None }

        let batch = self.terrain_cache.request( candidates)?;
        trace!("requesting {} terrain samples", batch.len());
        self.last_sample_request = Some(now);
        Some(batch)
    }
}
