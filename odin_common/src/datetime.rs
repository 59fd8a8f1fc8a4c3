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

use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use std::{fmt, ops::Sub, time::Duration};

/// milliseconds since the Unix epoch. This is what our traffic feeds use as authoritative timestamps
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Default)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub fn new (millis:i64)->Self { EpochMillis(millis) }

    pub fn from_secs (secs: i64)->Self { EpochMillis(secs*1000) }

    pub fn from_secs_f64 (secs: f64)->Self { EpochMillis( (secs * 1000.0).round() as i64) }

    pub fn millis (&self)->i64 { self.0 }

    /// (signed) seconds elapsed from `earlier` to self
    pub fn secs_since (&self, earlier: EpochMillis)->f64 { (self.0 - earlier.0) as f64 / 1000.0 }

    pub fn add_duration (&self, d: Duration)->EpochMillis {
        EpochMillis( self.0.saturating_add( i64::try_from( d.as_millis()).unwrap_or( i64::MAX)))
    }

    pub fn add_secs_f64 (&self, secs: f64)->EpochMillis { EpochMillis( self.0 + (secs * 1000.0).round() as i64) }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "EpochMillis({})", self.0)
        }
    }
}

impl From<DateTime<Utc>> for EpochMillis {
    fn from (date: DateTime<Utc>)->Self { EpochMillis( date.timestamp_millis()) }
}

impl Sub for EpochMillis {
    type Output = i64;
    fn sub (self, rhs: EpochMillis)->i64 { self.0 - rhs.0 }
}

#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn secs_f64 (n: f64)->Duration { Duration::from_secs_f64(n) }
