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

use std::sync::Arc;
use odin_dem::{DemSource, TerrainSampler, errors::OdinDemError};

// run with "cargo test test_static -- --nocapture"

#[tokio::test]
async fn test_static_heights() {
    let dem = DemSource::Static(12.5);
    let heights = dem.sample_heights( &[(-122.38, 37.62), (-122.37, 37.61), (-122.36, 37.60)]).await.unwrap();
    println!("heights: {heights:?}");
    assert_eq!( heights, vec![12.5, 12.5, 12.5]);

    let empty = dem.sample_heights( &[]).await.unwrap();
    assert!( empty.is_empty());
}

#[tokio::test]
async fn test_shared_sampler() {
    let dem: Arc<dyn TerrainSampler> = Arc::new( DemSource::Static(3.0));
    let heights = dem.sample_heights( &[(8.55, 47.45)]).await.unwrap();
    assert_eq!( heights, vec![3.0]);
}

#[tokio::test]
async fn test_unreachable_server() {
    // nothing should listen on this port, we just check that the error is propagated and not panicking
    let dem = DemSource::server("http://127.0.0.1:9");
    let res = dem.sample_heights( &[(0.0, 0.0)]).await;
    assert!( matches!( res, Err(OdinDemError::NetError(_))));
}

#[test]
fn test_ron_config() {
    let src: DemSource = ron::from_str( r#"Server( url: "http://localhost:9010/dem", no_data: Some(0.0))"#).unwrap();
    println!("{src:?}");
    assert_eq!( src, DemSource::Server{ url: "http://localhost:9010/dem".to_string(), no_data: Some(0.0) });

    let src: DemSource = ron::from_str( "Static(42.0)").unwrap();
    assert_eq!( src, DemSource::Static(42.0));
}
