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
use thiserror::Error;
use odin_common::net::OdinNetError;

#[derive(Error,Debug)]
pub enum OdinDemError {

    // the server (or file) did not return one height per requested position
    #[error("height count mismatch: requested {requested}, received {received}")]
    CountMismatch { requested: usize, received: usize },

    // generic self-created error
    #[error("DEM operation failed: {0}")]
    OpFailedError(String),

    // pass through for network errors (serve_dem queries)
    #[error("DEM network error: {0}")]
    NetError(#[from] OdinNetError),
}

pub fn op_failed<S: ToString> (msg: S)->OdinDemError {
    OdinDemError::OpFailedError(msg.to_string())
}
