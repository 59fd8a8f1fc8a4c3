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

//! raw aircraft samples as delivered by the traffic feed, and their single-writer ingestion

use std::{collections::{HashMap,HashSet}, fmt, sync::Arc, time::Duration};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;
use odin_common::datetime::EpochMillis;

/// stable callsign key. Cloning is cheap and it can be used to look up `&str` keys
pub type Callsign = Arc<str>;

/// an immutable, authoritative aircraft state sample
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Snapshot {
    pub callsign: Callsign,

    #[serde(default)]
    pub aircraft_type: String,

    /// degrees
    pub latitude: f64,
    pub longitude: f64,

    /// meters MSL
    pub altitude: f64,

    /// reported height above ground in meters (not every feed has it)
    #[serde(default)]
    pub altitude_agl: Option<f64>,

    /// knots
    pub groundspeed: f64,

    /// degrees true
    pub heading: f64,

    /// ft/min, positive is climbing
    #[serde(default)]
    pub vertical_rate: f64,

    /// deg/sec, positive is turning right
    #[serde(default)]
    pub turn_rate: Option<f64>,

    pub timestamp: EpochMillis,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Snapshot( cs: {}, pos: {:.5},{:.5}, alt: {:.0}m, spd: {:.0}kn, hdg: {:.0}, vr: {:.0}, time: {})",
                self.callsign, self.latitude, self.longitude, self.altitude, self.groundspeed, self.heading,
                self.vertical_rate, self.timestamp)
    }
}

/// the two snapshots we keep per callsign
#[derive(Debug,Clone,PartialEq)]
pub struct SnapshotPair {
    pub previous: Option<Snapshot>,
    pub current: Snapshot,
}

impl SnapshotPair {
    pub fn new (current: Snapshot)->Self { SnapshotPair { previous: None, current } }

    /// roll a new sample into the pair. Only strictly newer timestamps count as new data,
    /// identical or older timestamps are ignored. Returns true if the pair changed
    pub fn push (&mut self, snapshot: Snapshot)->bool {
        if snapshot.timestamp > self.current.timestamp {
            let last = std::mem::replace( &mut self.current, snapshot);
            self.previous = Some(last);
            true
        } else {
            false
        }
    }
}

/// immutable set of snapshot pairs that is published as a whole
#[derive(Debug,Clone,Default)]
pub struct SnapshotSet {
    pairs: HashMap<Callsign,SnapshotPair>,
}

impl SnapshotSet {
    pub fn from_pairs (pairs: HashMap<Callsign,SnapshotPair>)->Self { SnapshotSet { pairs } }

    pub fn get (&self, callsign: &str)->Option<&SnapshotPair> { self.pairs.get( callsign) }
    pub fn contains (&self, callsign: &str)->bool { self.pairs.contains_key( callsign) }
    pub fn len (&self)->usize { self.pairs.len() }
    pub fn is_empty (&self)->bool { self.pairs.is_empty() }
    pub fn iter (&self)->impl Iterator<Item=(&Callsign,&SnapshotPair)> { self.pairs.iter() }
}

/// read side of snapshot ingestion. Readers always see a complete set, never a partially updated one
#[derive(Debug,Clone)]
pub struct SnapshotFeed (watch::Receiver<Arc<SnapshotSet>>);

impl SnapshotFeed {
    /// the most recently published set. Cheap (Arc clone)
    pub fn latest (&self)->Arc<SnapshotSet> { self.0.borrow().clone() }
}

/// single writer of snapshot sets. This is what the network layer feeds, it keeps the
/// previous/current pairs and publishes a new immutable set on each change
pub struct SnapshotIngest {
    tx: watch::Sender<Arc<SnapshotSet>>,
    pairs: HashMap<Callsign,SnapshotPair>,
}

impl SnapshotIngest {
    pub fn new ()->(SnapshotIngest,SnapshotFeed) {
        let (tx,rx) = watch::channel( Arc::new( SnapshotSet::default()));
        (SnapshotIngest { tx, pairs: HashMap::new() }, SnapshotFeed(rx))
    }

    /// a new feed for the same ingest (e.g. for a second engine)
    pub fn feed (&self)->SnapshotFeed { SnapshotFeed( self.tx.subscribe()) }

    pub fn len (&self)->usize { self.pairs.len() }

    /// add or update a single sample and publish. Returns true if this was new data
    pub fn push (&mut self, snapshot: Snapshot)->bool {
        let is_new = self.merge( snapshot);
        if is_new { self.publish() }
        is_new
    }

    /// process a complete traffic report: samples are merged and callsigns that are not in the
    /// report are dropped. Returns the number of new samples
    pub fn push_all (&mut self, snapshots: Vec<Snapshot>)->usize {
        let mut n_new = 0;
        let n_before = self.pairs.len();

        let mut seen: HashSet<Callsign> = HashSet::with_capacity( snapshots.len());
        for s in snapshots {
            seen.insert( s.callsign.clone());
            if self.merge( s) { n_new += 1 }
        }
        self.pairs.retain( |cs,_| seen.contains(cs));

        if n_new > 0 || self.pairs.len() != n_before { self.publish() }
        n_new
    }

    /// explicitly drop an aircraft
    pub fn remove (&mut self, callsign: &str)->bool {
        let removed = self.pairs.remove( callsign).is_some();
        if removed { self.publish() }
        removed
    }

    /// drop all aircraft whose current sample is older than `drop_after`. Returns number of dropped aircraft
    pub fn remove_stale (&mut self, now: EpochMillis, drop_after: Duration)->usize {
        let max_age = i64::try_from( drop_after.as_millis()).unwrap_or( i64::MAX);
        let n_before = self.pairs.len();

        self.pairs.retain( |cs,pair| {
            let keep = (now - pair.current.timestamp) <= max_age;
            if !keep { debug!("dropping stale aircraft {}", cs) }
            keep
        });

        let n_dropped = n_before - self.pairs.len();
        if n_dropped > 0 { self.publish() }
        n_dropped
    }

    fn merge (&mut self, snapshot: Snapshot)->bool {
        match self.pairs.get_mut( &snapshot.callsign) {
            Some(pair) => pair.push( snapshot),
            None => {
                self.pairs.insert( snapshot.callsign.clone(), SnapshotPair::new( snapshot));
                true
            }
        }
    }

    fn publish (&self) {
        // never fails, even if there are no receivers yet
        self.tx.send_replace( Arc::new( SnapshotSet::from_pairs( self.pairs.clone())));
    }
}
