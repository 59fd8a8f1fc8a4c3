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

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use odin_common::define_cli;
use odin_dem::{DemSource, TerrainSampler};

define_cli! { ARGS [about="get_height - query terrain height from a serve_dem server"] =
    lon: f64 [help="longitude in degrees", allow_hyphen_values = true, long],
    lat: f64 [help="latitude in degrees", allow_hyphen_values = true, long],
    url: String [help="base URL of serve_dem server"]
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let dem = DemSource::server( &ARGS.url);
    let heights = dem.sample_heights( &[(ARGS.lon, ARGS.lat)]).await?;
    println!("height at {},{} = {} m", ARGS.lon, ARGS.lat, heights[0]);

    Ok(())
}
