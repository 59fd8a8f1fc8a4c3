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

//! the scheduling loop of the interpolation engine. The loop only runs while there are attached consumers

use std::{sync::{Arc, Mutex, MutexGuard, PoisonError}, time::Duration};
use tokio::{runtime::Handle, sync::broadcast, task::AbortHandle, time::{interval, MissedTickBehavior}};
use tracing::{debug, info};
use odin_common::datetime::EpochMillis;
use odin_dem::TerrainSampler;

use crate::{
    engine::InterpolationEngine,
    errors::{OdinTrackError, Result},
    state::{FleetChange, SharedAircraftStates},
};

struct Lifecycle {
    n_attached: usize,
    task: Option<AbortHandle>,
}

struct ServiceInner {
    engine: Arc<Mutex<InterpolationEngine>>,
    sampler: Arc<dyn TerrainSampler>,
    states: SharedAircraftStates,
    frame_interval: Duration,
    lifecycle: Mutex<Lifecycle>,
}

impl Drop for ServiceInner {
    fn drop (&mut self) {
        let lc = self.lifecycle.get_mut().unwrap_or_else( PoisonError::into_inner);
        if let Some(task) = lc.task.take() { task.abort() }
    }
}

/// owner of the tick loop. This is a cheap handle that can be cloned. Consumers call [`attach`](Self::attach),
/// the loop is started with the first and stopped when the last [`EngineHandle`] is released
#[derive(Clone)]
pub struct InterpolationService (Arc<ServiceInner>);

impl InterpolationService {
    pub fn new (engine: InterpolationEngine, sampler: Arc<dyn TerrainSampler>)->Self {
        let states = engine.states();
        let frame_interval = engine.config().frame_interval;

        InterpolationService( Arc::new( ServiceInner {
            engine: Arc::new( Mutex::new( engine)),
            sampler,
            states,
            frame_interval,
            lifecycle: Mutex::new( Lifecycle { n_attached: 0, task: None }),
        }))
    }

    /// register a consumer. Fails if this is the first consumer and we are not inside a tokio runtime
    pub fn attach (&self)->Result<EngineHandle> {
        let mut lc = self.lifecycle();
        if lc.n_attached == 0 {
            self.start_locked( &mut lc)?;
        }
        lc.n_attached += 1;
        debug!("engine attached ({} consumers)", lc.n_attached);

        Ok( EngineHandle { service: self.clone(), is_attached: true })
    }

    pub fn n_attached (&self)->usize { self.lifecycle().n_attached }

    pub fn is_running (&self)->bool { self.lifecycle().task.is_some() }

    /// start the loop independent of attached consumers. No-op if it is already running
    pub fn start (&self)->Result<()> {
        let mut lc = self.lifecycle();
        self.start_locked( &mut lc)
    }

    /// stop the loop. Attached handles stay valid, their states are just not updated anymore
    pub fn stop (&self) {
        let mut lc = self.lifecycle();
        Self::stop_locked( &mut lc)
    }

    pub fn states (&self)->SharedAircraftStates { self.0.states.clone() }

    pub fn subscribe (&self)->broadcast::Receiver<FleetChange> { self.engine().subscribe() }

    pub fn set_reference_elevation (&self, elevation: f64) { self.engine().set_reference_elevation( elevation) }

    /// run a closure with exclusive access to the engine (blocks the loop while it executes)
    pub fn with_engine<F,R> (&self, f: F)->R where F: FnOnce(&mut InterpolationEngine)->R {
        let mut engine = self.engine();
        f( &mut engine)
    }

    fn engine (&self)->MutexGuard<'_,InterpolationEngine> {
        self.0.engine.lock().unwrap_or_else( PoisonError::into_inner)
    }

    fn lifecycle (&self)->MutexGuard<'_,Lifecycle> {
        self.0.lifecycle.lock().unwrap_or_else( PoisonError::into_inner)
    }

    fn start_locked (&self, lc: &mut Lifecycle)->Result<()> {
        if lc.task.is_some() { return Ok(()) }

        let rt = Handle::try_current().map_err( |e| OdinTrackError::RuntimeError( e.to_string()))?;
        let engine = self.0.engine.clone();
        let sampler = self.0.sampler.clone();
        let frame_interval = self.0.frame_interval;

        let join_handle = rt.spawn( run_loop( engine, sampler, frame_interval));
        lc.task = Some( join_handle.abort_handle());
        info!("interpolation loop started with {:?} frame interval", frame_interval);
        Ok(())
    }

    fn stop_locked (lc: &mut Lifecycle) {
        if let Some(task) = lc.task.take() {
            task.abort();
            info!("interpolation loop stopped");
        }
    }

    fn release (&self) {
        let mut lc = self.lifecycle();
        lc.n_attached = lc.n_attached.saturating_sub(1);
        debug!("engine detached ({} consumers)", lc.n_attached);
        if lc.n_attached == 0 {
            Self::stop_locked( &mut lc);
        }
    }
}

/// ticks are never overlapping - the next one is only scheduled after the previous one completed
async fn run_loop (engine: Arc<Mutex<InterpolationEngine>>, sampler: Arc<dyn TerrainSampler>, frame_interval: Duration) {
    let mut interval = interval( frame_interval);
    interval.set_missed_tick_behavior( MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let report = {
            let mut engine = engine.lock().unwrap_or_else( PoisonError::into_inner);
            engine.tick( EpochMillis::now())
        };

        if let Some(batch) = report.terrain_batch {
            let sampler = sampler.clone();
            tokio::spawn( async move {
                batch.run( sampler.as_ref()).await;
            });
        }
    }
}

/// an attached consumer of the interpolation service. Dropping it detaches
pub struct EngineHandle {
    service: InterpolationService,
    is_attached: bool,
}

impl EngineHandle {
    pub fn states (&self)->SharedAircraftStates { self.service.states() }

    pub fn subscribe (&self)->broadcast::Receiver<FleetChange> { self.service.subscribe() }

    pub fn service (&self)->&InterpolationService { &self.service }

    pub fn detach (mut self) { self.release() }

    fn release (&mut self) {
        if self.is_attached {
            self.is_attached = false;
            self.service.release();
        }
    }
}

impl Drop for EngineHandle {
    fn drop (&mut self) { self.release() }
}
