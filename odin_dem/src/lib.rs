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

//! terrain height sampling for clients that need ground elevation at a (usually small) set of moving positions.
//! The main abstraction is the async, batched [`TerrainSampler`] trait. [`DemSource`] implements it for
//! a remote `serve_dem` server (`POST <url>/GetHeights`) and for a static (flat) terrain

use std::{sync::Arc, fmt::Debug};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod errors;
use errors::{OdinDemError, op_failed};

pub type Result<T> = std::result::Result<T, OdinDemError>;

/// async, batched height queries. Implementations have to return exactly one height (meters) per
/// input (lon,lat) position (degrees), in the same order
#[async_trait]
pub trait TerrainSampler: Send + Sync {
    async fn sample_heights (&self, pts: &[(f64,f64)]) -> Result<Vec<f64>>;
}

#[async_trait]
impl<T> TerrainSampler for Arc<T> where T: TerrainSampler + ?Sized {
    async fn sample_heights (&self, pts: &[(f64,f64)]) -> Result<Vec<f64>> {
        self.as_ref().sample_heights( pts).await
    }
}

/// query heights (in meters) for a slice of (lon,lat) positions (in degrees) from a `serve_dem` server.
/// use no_data to specify the value that should be substituted for DEM NoData cells (e.g. ocean)
pub async fn query_dem_heights (base_url: &str, no_data: Option<f64>, pts: &[(f64,f64)]) -> Result<Vec<f64>> {
    let url = match no_data {
        Some(no_data_value) => format!("{base_url}/GetHeights?no_data={no_data_value}"),
        None => format!("{base_url}/GetHeights")
    };

    let client = reqwest::Client::new();
    let heights: Vec<f64> = odin_common::net::post_json_query( &client, &url, pts).await?;
    check_count( pts.len(), heights)
}

fn check_count (requested: usize, heights: Vec<f64>) -> Result<Vec<f64>> {
    if heights.len() == requested {
        Ok(heights)
    } else {
        Err( OdinDemError::CountMismatch { requested, received: heights.len() })
    }
}

/// DEM access alternatives
/// this is the key abstraction for clients that should work with both a `serve_dem` server and offline data
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub enum DemSource {
    /// get heights from a `serve_dem` base URL, substituting the optional no_data value
    Server { url: String, no_data: Option<f64> },

    /// flat terrain at a fixed height (meters)
    Static(f64),
}

impl DemSource {
    pub fn server (url: impl ToString)->Self { DemSource::Server { url: url.to_string(), no_data: Some(0.0) } }

    pub async fn get_heights (&self, locations: &[(f64,f64)]) -> Result<Vec<f64>> {
        match self {
            DemSource::Server{url,no_data} => {
                debug!("querying {} heights from {}", locations.len(), url);
                query_dem_heights( url.as_str(), *no_data, locations).await
            }
            DemSource::Static(h) => {
                Ok( vec![*h; locations.len()] )
            }
        }
    }
}

#[async_trait]
impl TerrainSampler for DemSource {
    async fn sample_heights (&self, pts: &[(f64,f64)]) -> Result<Vec<f64>> {
        if pts.is_empty() { return Ok( Vec::new()) }
        self.get_heights( pts).await
    }
}
