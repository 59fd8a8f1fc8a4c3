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

use tokio::sync::broadcast::error::TryRecvError;
use odin_common::datetime::EpochMillis;
use odin_dem::DemSource;
use odin_track::{InterpConfig, InterpolationEngine, Snapshot, SnapshotIngest, errors::OdinTrackError};

// run with "cargo test --test test_engine -- --nocapture"

fn snapshot (cs: &str, secs: i64, alt: f64, groundspeed: f64, vertical_rate: f64)->Snapshot {
    Snapshot {
        callsign: cs.into(),
        aircraft_type: "B38M".to_string(),
        latitude: 37.62 + secs as f64 * 1e-4,
        longitude: -122.38,
        altitude: alt,
        altitude_agl: None,
        groundspeed,
        heading: 280.0,
        vertical_rate,
        turn_rate: None,
        timestamp: EpochMillis::from_secs(secs),
    }
}

fn at (secs: f64)->EpochMillis { EpochMillis::from_secs_f64(secs) }

fn new_engine ()->(SnapshotIngest,InterpolationEngine) {
    let (ingest, feed) = SnapshotIngest::new();
    (ingest, InterpolationEngine::new( InterpConfig::default(), feed).unwrap())
}

#[test]
fn test_idempotent_tick() {
    let (mut ingest, mut engine) = new_engine();
    ingest.push( snapshot( "UAL1", 100, 3000.0, 250.0, 0.0));
    ingest.push( snapshot( "UAL1", 115, 2900.0, 245.0, -400.0));
    ingest.push( snapshot( "SKW2", 100, 3.0, 12.0, 0.0));

    engine.tick( at(120.0));
    let s1 = engine.states().snapshot();
    engine.tick( at(120.0));
    let s2 = engine.states().snapshot();
    for s in &s1 { println!("{s}") }

    assert_eq!( s1.len(), 2);
    assert_eq!( s1, s2);

    engine.tick( at(121.0));
    let s3 = engine.states().snapshot();
    assert_ne!( s1, s3);
}

#[test]
fn test_idempotent_during_transition() {
    let (mut ingest, mut engine) = new_engine();
    ingest.push( snapshot( "UAL1", 100, 60.0, 140.0, -700.0));
    engine.tick( at(100.0));
    assert!( !engine.states().get("UAL1").unwrap().is_on_ground);

    ingest.push( snapshot( "UAL1", 101, 2.0, 30.0, 0.0)); // touched down and slowed below threshold
    engine.tick( at(102.0));
    assert!( engine.terrain_record("UAL1").unwrap().transition().is_some());

    let s1 = engine.states().get("UAL1").unwrap();
    engine.tick( at(102.0));
    let s2 = engine.states().get("UAL1").unwrap();
    assert_eq!( s1, s2);
    assert!( s1.is_on_ground);
    assert_eq!( s1.roll, 0.0);
}

#[test]
fn test_segment_physics_kept() {
    let (mut ingest, mut engine) = new_engine();
    ingest.push( snapshot( "UAL1", 100, 3000.0, 250.0, 0.0));
    ingest.push( snapshot( "UAL1", 115, 2900.0, 245.0, 0.0));

    engine.tick( at(116.0));
    let seg = engine.states().get("UAL1").unwrap().segment;
    println!("segment: {seg:?}");
    assert_eq!( seg.timestamp, Some( EpochMillis::from_secs(115)));
    assert!( seg.vertical_rate < -1000.0); // 100m in 15 sec

    engine.tick( at(125.0));
    assert_eq!( engine.states().get("UAL1").unwrap().segment, seg);

    ingest.push( snapshot( "UAL1", 130, 2900.0, 245.0, 0.0));
    engine.tick( at(131.0));
    let seg1 = engine.states().get("UAL1").unwrap().segment;
    assert_eq!( seg1.timestamp, Some( EpochMillis::from_secs(130)));
    assert!( seg1.vertical_rate.abs() < 1e-9);
}

#[test]
fn test_purge() {
    let (mut ingest, mut engine) = new_engine();
    ingest.push_all( vec![ snapshot( "UAL1", 100, 3000.0, 250.0, 0.0), snapshot( "SKW2", 100, 3.0, 12.0, 0.0) ]);
    engine.terrain_cache().insert( "SKW2".into(), 3.0);

    engine.tick( at(100.0));
    assert_eq!( engine.states().len(), 2);
    assert!( engine.gear_state("SKW2").is_some() && engine.terrain_record("SKW2").is_some());

    ingest.push_all( vec![ snapshot( "UAL1", 115, 2900.0, 250.0, 0.0) ]);
    let report = engine.tick( at(116.0));
    assert_eq!( (report.n_aircraft, report.added, report.removed), (1, 0, 1));

    let states = engine.states();
    assert!( states.contains("UAL1") && !states.contains("SKW2"));
    assert!( engine.gear_state("SKW2").is_none());
    assert!( engine.terrain_record("SKW2").is_none());
    assert_eq!( engine.terrain_cache().sample("SKW2"), None);
}

#[test]
fn test_cardinality_notifications() {
    let (mut ingest, mut engine) = new_engine();
    let mut rx = engine.subscribe();

    ingest.push( snapshot( "UAL1", 100, 3000.0, 250.0, 0.0));
    ingest.push( snapshot( "SKW2", 100, 3.0, 12.0, 0.0));
    engine.tick( at(100.0));

    let change = rx.try_recv().unwrap();
    println!("{change:?}");
    assert_eq!( change.added.len(), 2);
    assert_eq!( change.count, 2);

    // value changes are not notified
    ingest.push( snapshot( "UAL1", 115, 2900.0, 250.0, 0.0));
    engine.tick( at(101.0));
    engine.tick( at(102.0));
    assert!( matches!( rx.try_recv(), Err(TryRecvError::Empty)));

    ingest.remove("SKW2");
    engine.tick( at(103.0));
    let change = rx.try_recv().unwrap();
    assert_eq!( change.removed.len(), 1);
    assert_eq!( &*change.removed[0], "SKW2");
    assert_eq!( change.count, 1);
}

#[test]
fn test_gear_initialization() {
    let (mut ingest, mut engine) = new_engine();
    ingest.push( snapshot( "DAL1", 100, 10668.0, 460.0, 0.0)); // 35000ft
    ingest.push( snapshot( "SKW2", 100, 3.0, 0.0, 0.0));

    engine.tick( at(100.0));
    let cruise = engine.states().get("DAL1").unwrap();
    let ground = engine.states().get("SKW2").unwrap();

    assert!( !cruise.is_on_ground);
    assert_eq!( cruise.gear_progress, 0.0);
    assert!( ground.is_on_ground);
    assert_eq!( ground.gear_progress, 1.0);
    assert_eq!( ground.altitude, 3.5); // no sample yet: reported height plus ground offset
}

#[test]
fn test_reference_elevation() {
    let (mut ingest, mut engine) = new_engine();
    engine.set_reference_elevation( 10.0);
    ingest.push( snapshot( "SKW2", 100, 3.0, 5.0, 0.0));

    engine.tick( at(100.0));
    assert_eq!( engine.states().get("SKW2").unwrap().altitude, 10.5);
}

#[tokio::test]
async fn test_terrain_sampling() {
    let (mut ingest, mut engine) = new_engine();
    ingest.push( snapshot( "SKW2", 100, 10.0, 15.0, 0.0));
    ingest.push( snapshot( "DAL1", 100, 10668.0, 460.0, 0.0));

    let report = engine.tick( at(100.0));
    let batch = report.terrain_batch.unwrap();
    assert_eq!( batch.callsigns.len(), 1);
    assert_eq!( &*batch.callsigns[0], "SKW2");
    assert!( engine.terrain_cache().is_in_flight("SKW2"));

    // still in flight and interval not expired
    assert!( engine.tick( at(100.5)).terrain_batch.is_none());

    batch.run( &DemSource::Static(12.0)).await;
    assert_eq!( engine.terrain_cache().sample("SKW2"), Some(12.0));

    engine.tick( at(101.0));
    let s = engine.states().get("SKW2").unwrap();
    println!("{s}");
    assert!( s.is_on_ground);

    assert_eq!( s.altitude, 12.5); // first sample is used as is

    for i in 0..8 { engine.tick( at(101.1 + i as f64 * 0.1)); }
    assert_eq!( engine.states().get("SKW2").unwrap().altitude, 12.5);

    // next request once the sample interval expired
    assert!( engine.tick( at(103.0)).terrain_batch.is_some());
}

#[test]
fn test_flare_on_approach() {
    let (mut ingest, mut engine) = new_engine();
    // 100ft -> 20ft AGL in 6s with 130kn (reference elevation 0, no samples)
    ingest.push( snapshot( "UAL1", 100, 30.48, 130.0, -800.0));
    ingest.push( snapshot( "UAL1", 106, 6.1, 130.0, -800.0));

    engine.tick( at(106.0)); // t=0, 100ft
    let high = engine.states().get("UAL1").unwrap();
    engine.tick( at(111.0)); // ~33ft
    let low = engine.states().get("UAL1").unwrap();
    println!("pitch at 100ft: {:.2}, at ~33ft: {:.2}", high.pitch, low.pitch);

    assert!( high.pitch < 0.0);
    assert!( low.pitch > high.pitch);
    assert!( !low.is_on_ground);
}

#[test]
fn test_invalid_config_rejected() {
    let (_, feed) = SnapshotIngest::new();
    let mut config = InterpConfig::default();
    config.orientation.max_bank_deg = -1.0;

    match InterpolationEngine::new( config, feed) {
        Err(OdinTrackError::InvalidConfig(msg)) => println!("rejected: {msg}"),
        Err(e) => panic!("unexpected error {e}"),
        Ok(_) => panic!("engine accepted invalid config")
    }
}

#[test]
fn test_states_updated_in_place() {
    let (mut ingest, mut engine) = new_engine();
    ingest.push( snapshot( "UAL1", 100, 3000.0, 250.0, 0.0));
    ingest.push( snapshot( "UAL1", 115, 2900.0, 245.0, -400.0));

    let states = engine.states();
    engine.tick( at(116.0));
    let type_ptr = states.with( "UAL1", |s| s.aircraft_type.as_ptr()).unwrap();
    let lat = states.with( "UAL1", |s| s.latitude).unwrap();

    engine.tick( at(120.0));
    assert_eq!( states.with( "UAL1", |s| s.aircraft_type.as_ptr()), Some(type_ptr)); // not re-allocated
    assert!( states.with( "UAL1", |s| s.latitude).unwrap() > lat);

    // type changes are still picked up
    let mut s = snapshot( "UAL1", 130, 2800.0, 240.0, -400.0);
    s.aircraft_type = "A20N".to_string();
    ingest.push( s);
    engine.tick( at(131.0));
    let state = states.get( "UAL1").unwrap();
    println!("{state}");
    assert_eq!( state.aircraft_type, "A20N");
}
