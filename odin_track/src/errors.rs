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
use odin_common::ron::OdinConfigError;
use odin_dem::errors::OdinDemError;

pub type Result<T> = std::result::Result<T,OdinTrackError>;

#[derive(Error,Debug)]
pub enum OdinTrackError {

    #[error("config error {0}")]
    ConfigError( #[from] OdinConfigError),

    #[error("invalid config value {0}")]
    InvalidConfig(String),

    #[error("terrain sampling error {0}")]
    TerrainError( #[from] OdinDemError),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("no async runtime {0}")]
    RuntimeError(String),

    #[error("operation failed {0}")]
    OpFailedError(String)
}

macro_rules! invalid_config {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinTrackError::InvalidConfig( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_config;

pub fn op_failed<S: ToString> (msg: S)->OdinTrackError {
    OdinTrackError::OpFailedError(msg.to_string())
}
