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

use serde::{Serialize,Deserialize};
use odin_common::ron::*;

#[derive(Serialize,Deserialize,Debug,PartialEq)]
#[serde(default)]
struct TestConfig {
    name: String,
    threshold: f64,
}

impl Default for TestConfig {
    fn default()->Self { TestConfig { name: "default".to_string(), threshold: 42.0 } }
}

#[test]
fn test_partial_config() {
    let c: TestConfig = from_ron_str( "(threshold: 1.5)").unwrap();
    assert_eq!( c, TestConfig{ name: "default".to_string(), threshold: 1.5 });
}

#[test]
fn test_config_roundtrip() {
    let c = TestConfig::default();
    let s = to_ron_string(&c).unwrap();
    println!("{s}");
    let c1: TestConfig = from_ron_str(&s).unwrap();
    assert_eq!( c, c1);
}

#[test]
fn test_parse_error() {
    let res: Result<TestConfig> = from_ron_str( "(threshold: \"no number\")");
    assert!( matches!( res, Err(OdinConfigError::ParseError(_))));
}
