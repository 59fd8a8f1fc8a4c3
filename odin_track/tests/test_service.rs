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

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use odin_common::datetime::{EpochMillis, millis};
use odin_dem::DemSource;
use odin_track::{InterpConfig, InterpolationEngine, InterpolationService, Snapshot, SnapshotIngest, errors::OdinTrackError};

// run with "cargo test --test test_service -- --nocapture"

fn snapshot (cs: &str, timestamp: EpochMillis, alt: f64, groundspeed: f64)->Snapshot {
    Snapshot {
        callsign: cs.into(),
        aircraft_type: "C172".to_string(),
        latitude: 37.46,
        longitude: -122.11,
        altitude: alt,
        altitude_agl: None,
        groundspeed,
        heading: 310.0,
        vertical_rate: 0.0,
        turn_rate: None,
        timestamp,
    }
}

fn new_service ()->(SnapshotIngest,InterpolationService) {
    let (ingest, feed) = SnapshotIngest::new();
    let config = InterpConfig { frame_interval: millis(10), ..InterpConfig::default() };
    let engine = InterpolationEngine::new( config, feed).unwrap();
    (ingest, InterpolationService::new( engine, Arc::new( DemSource::Static(2.0))))
}

#[tokio::test]
async fn test_attach_detach() {
    let (mut ingest, service) = new_service();
    assert!( !service.is_running());

    ingest.push( snapshot( "N123", EpochMillis::now(), 2.0, 0.0));

    let h1 = service.attach().unwrap();
    assert!( service.is_running());
    let h2 = service.attach().unwrap();
    assert_eq!( service.n_attached(), 2);

    sleep( Duration::from_millis(100)).await;
    let state = h1.states().get("N123").unwrap();
    println!("{state}");
    assert!( state.is_on_ground);

    drop(h1);
    assert!( service.is_running());
    assert_eq!( service.n_attached(), 1);

    h2.detach();
    assert!( !service.is_running());
    assert_eq!( service.n_attached(), 0);

    // re-attaching restarts the loop
    let h3 = service.attach().unwrap();
    assert!( service.is_running());
    drop(h3);
    assert!( !service.is_running());
}

#[tokio::test]
async fn test_fleet_changes() {
    let (mut ingest, service) = new_service();
    let handle = service.attach().unwrap();
    let mut rx = handle.subscribe();

    ingest.push( snapshot( "N123", EpochMillis::now(), 500.0, 90.0));
    let change = tokio::time::timeout( Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    println!("{change:?}");
    assert_eq!( change.count, 1);

    ingest.remove("N123");
    let change = tokio::time::timeout( Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    assert_eq!( change.removed.len(), 1);
    assert!( handle.states().is_empty());
}

#[tokio::test]
async fn test_terrain_requests() {
    let (mut ingest, service) = new_service();
    ingest.push( snapshot( "N123", EpochMillis::now(), 1.0, 5.0));

    let handle = service.attach().unwrap();
    sleep( Duration::from_millis(200)).await;

    let sample = service.with_engine( |e| e.terrain_cache().sample("N123"));
    assert_eq!( sample, Some(2.0));
    assert!( (handle.states().get("N123").unwrap().altitude - 2.5).abs() < 1e-9);
}

#[test]
fn test_attach_without_runtime() {
    let (_ingest, service) = new_service();
    assert!( matches!( service.attach(), Err(OdinTrackError::RuntimeError(_))));
    assert_eq!( service.n_attached(), 0);
}
