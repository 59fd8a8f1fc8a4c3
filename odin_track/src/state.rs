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

//! the published per-aircraft output of the interpolation engine

use std::{fmt, sync::Arc};
use dashmap::DashMap;
use serde::Serialize;
use odin_common::{angle::shortest_delta, datetime::EpochMillis, uom::meters_to_feet};

use crate::snapshot::{Callsign, Snapshot};

/// vertical and turn rate of the current snapshot segment. Only recomputed when a snapshot with a new
/// timestamp arrives, so that repeated ticks see the same segment physics
#[derive(Serialize,Debug,Clone,Copy,PartialEq,Default)]
pub struct SegmentPhysics {
    /// timestamp of the snapshot these physics were computed for (None if not yet computed)
    pub timestamp: Option<EpochMillis>,

    /// ft/min
    pub vertical_rate: f64,

    /// deg/sec
    pub turn_rate: f64,
}

impl SegmentPhysics {
    /// derive rates from a snapshot pair. Vertical rate comes from the altitude change over the segment,
    /// turn rate from the reported value or the shortest arc heading change. Without a valid previous
    /// snapshot the reported values are used
    pub fn from_pair (previous: Option<&Snapshot>, current: &Snapshot)->Self {
        let timestamp = Some(current.timestamp);

        if let Some(prev) = previous.filter( |p| p.timestamp < current.timestamp) {
            let dt = current.timestamp.secs_since( prev.timestamp);
            let vertical_rate = meters_to_feet( current.altitude - prev.altitude) * 60.0 / dt;
            let turn_rate = current.turn_rate.unwrap_or_else( || shortest_delta( prev.heading, current.heading) / dt);
            SegmentPhysics { timestamp, vertical_rate, turn_rate }

        } else {
            SegmentPhysics { timestamp, vertical_rate: current.vertical_rate, turn_rate: current.turn_rate.unwrap_or(0.0) }
        }
    }

    pub fn is_for (&self, snapshot: &Snapshot)->bool { self.timestamp == Some(snapshot.timestamp) }
}

/// the smoothed state of an aircraft at the last tick
#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct InterpolatedAircraftState {
    pub callsign: Callsign,
    pub aircraft_type: String,

    /// degrees
    pub latitude: f64,
    pub longitude: f64,

    /// terrain corrected height in meters (renderer datum)
    pub altitude: f64,

    /// knots
    pub groundspeed: f64,

    /// degrees
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,

    pub is_extrapolated: bool,
    pub is_on_ground: bool,

    /// 0 is fully retracted, 1 fully extended
    pub gear_progress: f64,

    pub segment: SegmentPhysics,
}

impl InterpolatedAircraftState {
    /// a not yet estimated state, the engine fills in the values in place
    pub(crate) fn new (callsign: Callsign, aircraft_type: String)->Self {
        InterpolatedAircraftState {
            callsign, aircraft_type,
            latitude: 0.0, longitude: 0.0, altitude: 0.0,
            groundspeed: 0.0, heading: 0.0, pitch: 0.0, roll: 0.0,
            is_extrapolated: false, is_on_ground: false,
            gear_progress: 0.0,
            segment: SegmentPhysics::default()
        }
    }
}

impl fmt::Display for InterpolatedAircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{:8} {:9.5},{:10.5} alt:{:7.1}m spd:{:4.0}kn hdg:{:5.1} pitch:{:5.1} roll:{:5.1} gear:{:4.2}{}{}",
                self.callsign, self.latitude, self.longitude, self.altitude, self.groundspeed,
                self.heading, self.pitch, self.roll, self.gear_progress,
                if self.is_on_ground {" GND"} else {""},
                if self.is_extrapolated {" EXT"} else {""})
    }
}

/// read access to the engine output. The map is only written by the engine, clones of this
/// handle can be passed to any number of readers
#[derive(Debug,Clone,Default)]
pub struct SharedAircraftStates (pub(crate) Arc<DashMap<Callsign,InterpolatedAircraftState>>);

impl SharedAircraftStates {
    pub(crate) fn new ()->Self { SharedAircraftStates( Arc::new( DashMap::new())) }

    pub fn get (&self, callsign: &str)->Option<InterpolatedAircraftState> {
        self.0.get( callsign).map( |e| e.value().clone())
    }

    /// run a closure on the state of `callsign` without cloning it
    pub fn with<F,R> (&self, callsign: &str, f: F)->Option<R> where F: FnOnce(&InterpolatedAircraftState)->R {
        self.0.get( callsign).map( |e| f( e.value()))
    }

    pub fn for_each<F> (&self, mut f: F) where F: FnMut(&InterpolatedAircraftState) {
        for e in self.0.iter() { f( e.value()) }
    }

    pub fn contains (&self, callsign: &str)->bool { self.0.contains_key( callsign) }
    pub fn len (&self)->usize { self.0.len() }
    pub fn is_empty (&self)->bool { self.0.is_empty() }

    pub fn callsigns (&self)->Vec<Callsign> {
        self.0.iter().map( |e| e.key().clone()).collect()
    }

    /// a copy of all states, sorted by callsign
    pub fn snapshot (&self)->Vec<InterpolatedAircraftState> {
        let mut list: Vec<InterpolatedAircraftState> = self.0.iter().map( |e| e.value().clone()).collect();
        list.sort_by( |a,b| a.callsign.cmp( &b.callsign));
        list
    }
}

/// notification that is sent when the set of active aircraft changes. Value changes of existing
/// aircraft are not notified
#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct FleetChange {
    pub added: Vec<Callsign>,
    pub removed: Vec<Callsign>,
    pub count: usize,
}

impl FleetChange {
    pub fn is_empty (&self)->bool { self.added.is_empty() && self.removed.is_empty() }
}
