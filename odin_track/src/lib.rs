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

//! smoothing of aircraft motion between infrequent position reports.
//!
//! Raw [`Snapshot`]s come in through a [`SnapshotIngest`] at whatever rate the traffic feed delivers them (usually
//! every few seconds). The [`InterpolationEngine`] turns the latest snapshot pair of each aircraft into a
//! continuously updated [`InterpolatedAircraftState`] per display frame:
//! ```text
//!   snapshots ─▶ kinematic ─▶ flare ─▶ terrain ─▶ gear ─▶ SharedAircraftStates
//! ```
//! The [`InterpolationService`] runs the engine at the configured frame rate as long as there are attached
//! consumers, and dispatches the asynchronous terrain height requests

pub mod errors;
pub mod config;
pub mod snapshot;
pub mod state;
pub mod kinematic;
pub mod flare;
pub mod terrain;
pub mod gear;
pub mod engine;
pub mod service;

pub use config::{InterpConfig, load_config};
pub use snapshot::{Callsign, Snapshot, SnapshotPair, SnapshotSet, SnapshotFeed, SnapshotIngest};
pub use state::{InterpolatedAircraftState, SegmentPhysics, SharedAircraftStates, FleetChange};
pub use engine::{InterpolationEngine, TickReport};
pub use service::{InterpolationService, EngineHandle};
