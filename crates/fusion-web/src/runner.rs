use fusion_engine::{ProtocolLayout, SimClock, SimConfig, SimContext};

/// Tick driver that wires the simulation to a display loop.
///
/// The JavaScript side calls `tick` once per animation frame with the raw
/// frame delta and reads the packed shared buffer afterwards.
pub struct SimRunner {
    ctx: SimContext,
    config: SimConfig,
    clock: SimClock,
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    frame_counter: u32,
    initialized: bool,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let config = config.accepted();
        let ctx = SimContext::new(&config);
        let layout = ProtocolLayout::from_frame(ctx.frame());
        let buffer = vec![0.0; layout.buffer_total_floats];
        Self {
            ctx,
            config,
            clock: SimClock::new(),
            layout,
            buffer,
            frame_counter: 0,
            initialized: false,
        }
    }

    /// Publish the initial frame. Call once after construction.
    pub fn init(&mut self) {
        self.initialized = true;
        self.pack();
    }

    /// Run one display frame.
    pub fn tick(&mut self, raw_dt: f32) {
        if !self.initialized {
            return;
        }
        let dt = self.clock.advance(raw_dt, self.config.animation_speed);
        self.ctx.tick(&self.config, dt, self.clock.elapsed());
        self.pack();
    }

    /// Restart the sequence. The next read sees the fully reset frame.
    pub fn reset(&mut self) {
        self.ctx.reset(&self.config);
        self.pack();
    }

    /// Replace the configuration. Returns false (keeping the old one) on bad JSON.
    ///
    /// The stored config is sanitized here, once. Size and hue changes
    /// re-roll the affected particle attributes.
    pub fn set_config_json(&mut self, json: &str) -> bool {
        match SimConfig::from_json(json) {
            Ok(next) => {
                let next = next.accepted();
                let resize = next.particle_size != self.config.particle_size;
                let recolor = next.particle_hue != self.config.particle_hue;
                if next.particle_count != self.config.particle_count
                    || next.trail_count != self.config.trail_count
                {
                    log::info!("runner: pool capacity changes apply on the next init");
                }
                self.config = next;
                if resize {
                    self.ctx.resize_particles(&self.config);
                }
                if recolor {
                    self.ctx.recolor_particles(&self.config);
                }
                self.pack();
                true
            }
            Err(e) => {
                log::warn!("runner: rejected config: {}", e);
                false
            }
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    fn pack(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.layout
            .write_frame(self.ctx.frame(), self.frame_counter, &mut self.buffer);
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn state_code(&self) -> f32 {
        self.ctx.state().code()
    }

    pub fn particle_count(&self) -> u32 {
        self.layout.max_particles as u32
    }

    pub fn trail_count(&self) -> u32 {
        self.layout.max_trails as u32
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }
}
