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
use tokio::{self, fs::File, io::{BufReader, AsyncBufReadExt}};
use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;
use odin_common::{define_cli, datetime::{EpochMillis, secs}};
use odin_dem::{DemSource, TerrainSampler};
use odin_track::{InterpConfig, InterpolationEngine, Snapshot, SnapshotIngest, load_config};

define_cli! { ARGS [about="replay a JSON-lines aircraft snapshot log through the interpolation engine"] =
    config: Option<String> [help="path of RON interpolation config", long],
    dem: Option<String> [help="base URL of serve_dem server for terrain heights", long],
    fps: f64 [help="simulated frames per second", long, default_value="60"],
    print_interval: f64 [help="print interval in simulated seconds", long, default_value="1.0"],
    drop_after: u64 [help="drop aircraft that were not updated for this many seconds", long, default_value="60"],
    tail: f64 [help="seconds to keep running after the last snapshot", long, default_value="10.0"],
    file: String [help="path of snapshot file (one JSON Snapshot per line)"]
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let frame_millis = frame_millis( ARGS.fps)?;

    let config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => InterpConfig::default()
    };
    let sampler: Arc<dyn TerrainSampler> = match &ARGS.dem {
        Some(url) => Arc::new( DemSource::server( url)),
        None => Arc::new( DemSource::Static( config.terrain.reference_elevation_m))
    };

    let mut snapshots = read_snapshots( &ARGS.file).await?;
    if snapshots.is_empty() {
        println!("no snapshots in {}", ARGS.file);
        return Ok(())
    }
    snapshots.sort_by_key( |s| s.timestamp);
    let start = snapshots[0].timestamp;
    let end = snapshots[snapshots.len()-1].timestamp.add_secs_f64( ARGS.tail);
    println!("replaying {} snapshots from {} to {}", snapshots.len(), start, end);

    let (mut ingest, feed) = SnapshotIngest::new();
    let mut engine = InterpolationEngine::new( config, feed)?;
    let mut fleet_changes = engine.subscribe();

    let mut pending = snapshots.into_iter().peekable();
    let mut now = start;
    let mut next_print = start;

    while now <= end {
        while let Some(s) = pending.next_if( |s| s.timestamp <= now) {
            ingest.push( s);
        }
        ingest.remove_stale( now, secs( ARGS.drop_after));

        let report = engine.tick( now);
        if let Some(batch) = report.terrain_batch {
            batch.run( sampler.as_ref()).await; // simulated time stands still while we wait
        }

        while let Ok(change) = fleet_changes.try_recv() {
            println!("-- {}: added {:?}, removed {:?} ({} aircraft)", now, change.added, change.removed, change.count);
        }

        if now >= next_print {
            println!("{}:", now);
            for state in engine.states().snapshot() {
                println!("  {}", state);
            }
            next_print = next_print.add_secs_f64( ARGS.print_interval);
        }

        now = EpochMillis::new( now.millis() + frame_millis);
    }

    Ok(())
}

/// simulated frame step. Has to be at least 1ms, otherwise simulated time would not advance
fn frame_millis (fps: f64)->Result<i64> {
    if !(fps > 0.0) { bail!("fps has to be positive: {}", fps) }

    let ms = (1000.0 / fps).round();
    if ms < 1.0 { bail!("fps {} exceeds the 1ms timestamp resolution", fps) }
    Ok( ms as i64)
}

async fn read_snapshots (path: &str)->Result<Vec<Snapshot>> {
    let file = File::open( path).await?;
    let mut lines = BufReader::new( file).lines();
    let mut snapshots = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue }

        match serde_json::from_str::<Snapshot>( line) {
            Ok(s) => snapshots.push( s),
            Err(e) => eprintln!("ignoring malformed snapshot: {} ({})", line, e)
        }
    }
    Ok(snapshots)
}
