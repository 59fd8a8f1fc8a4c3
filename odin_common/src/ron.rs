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

//! RON based configuration loading

use std::{fs, path::Path};
use serde::{Serialize,de::DeserializeOwned};
use ron::ser::PrettyConfig;

crate::define_error!{ pub OdinConfigError =
    IOError(#[from] std::io::Error) : "config IO error: {0}",
    ParseError(#[from] ron::error::SpannedError) : "config parse error: {0}",
    SerializeError(#[from] ron::Error) : "config serialization error: {0}",
    InvalidValue(String) : "invalid config value: {0}"
}

pub type Result<T> = std::result::Result<T, OdinConfigError>;

pub fn invalid_value<S: ToString> (msg: S)->OdinConfigError {
    OdinConfigError::InvalidValue(msg.to_string())
}

/// load a config struct from a RON file
pub fn load_config<C,P> (path: P)->Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let data = fs::read_to_string( path.as_ref())?;
    from_ron_str( &data)
}

pub fn from_ron_str<C> (s: &str)->Result<C> where C: DeserializeOwned {
    Ok( ron::de::from_str(s)? )
}

/// pretty print a config (e.g. to create a template file from Default values)
pub fn to_ron_string<C> (config: &C)->Result<String> where C: Serialize {
    let opts = PrettyConfig::new().struct_names(true);
    Ok( ron::ser::to_string_pretty( config, opts)? )
}
