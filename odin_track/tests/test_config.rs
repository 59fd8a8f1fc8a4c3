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

use std::time::Duration;
use odin_common::ron::{from_ron_str, to_ron_string};
use odin_track::{config::*, errors::OdinTrackError};

#[test]
fn test_defaults() {
    let config = InterpConfig::default();
    config.validate().unwrap();

    assert_eq!( config.orientation.intensity, 1.0);
    assert_eq!( config.gear.extend_altitude_ft, 2000.0);
    assert_eq!( config.gear.cruise_altitude_ft, 10000.0);
    assert_eq!( config.terrain.transition_frames, 7);
    assert_eq!( config.terrain.smoothing_factor, 0.2);
}

#[test]
fn test_partial_ron() {
    let config: InterpConfig = from_ron_str( "InterpConfig( orientation: (intensity: 0.8), gear: (extend_altitude_ft: 1800.0) )").unwrap();
    println!("{config:#?}");

    assert_eq!( config.orientation.intensity, 0.8);
    assert!( config.orientation.enabled);
    assert_eq!( config.gear.extend_altitude_ft, 1800.0);
    assert_eq!( config.gear.retract_altitude_ft, 300.0);
    assert_eq!( config.flare, FlareConfig::default());
    config.validate().unwrap();
}

#[test]
fn test_ron_roundtrip() {
    let config = InterpConfig::default();
    let s = to_ron_string( &config).unwrap();
    println!("{s}");
    let config1: InterpConfig = from_ron_str( &s).unwrap();
    assert_eq!( config, config1);
}

#[test]
fn test_invalid_values() {
    let mut config = InterpConfig::default();
    config.orientation.intensity = 2.0;
    assert!( matches!( config.validate(), Err(OdinTrackError::InvalidConfig(_))));

    let mut config = InterpConfig::default();
    config.gear.retract_altitude_ft = 2500.0;
    assert!( config.validate().is_err());

    let mut config = InterpConfig::default();
    config.flare.end_agl_ft = 60.0;
    assert!( config.validate().is_err());

    let mut config = InterpConfig::default();
    config.terrain.smoothing_factor = 0.0;
    assert!( config.validate().is_err());

    let mut config = InterpConfig::default();
    config.frame_interval = Duration::ZERO;
    assert!( config.validate().is_err());
}

#[test]
fn test_load_config() {
    let path = concat!( env!("CARGO_MANIFEST_DIR"), "/configs/interp.ron");
    let config = load_config( path).unwrap();
    println!("{config:?}");

    assert_eq!( config.terrain.reference_elevation_m, 4.0);
    assert_eq!( config.terrain.sample_interval, Duration::from_secs(2));
    assert_eq!( config.frame_interval, Duration::from_nanos(16_666_667));

    assert!( matches!( load_config( "no/such/config.ron"), Err(OdinTrackError::ConfigError(_))));
}
