use plat_engine::{
    ButtonState, DrawList, EngineContext, FixedTimestep, Game, GameConfig, InputEvent,
    InputQueue, KeyMap, RenderContext, SpriteManifest,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    buttons: ButtonState,
    keymap: KeyMap,
    draw: DrawList,
    manifest: Option<SpriteManifest>,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
    /// This frame's draw list, serialized once per tick.
    draw_json: String,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::with_config(config.clone()),
            input: InputQueue::new(),
            buttons: ButtonState::new(),
            keymap: KeyMap::default(),
            draw: DrawList::with_capacity(config.max_draw_commands),
            manifest: None,
            timestep: FixedTimestep::new(config.fixed_dt),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            draw_json: String::from("[]"),
            config,
            initialized: false,
            game,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.ctx.config = self.config.clone();
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.draw = DrawList::with_capacity(self.config.max_draw_commands);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Replace the default key bindings.
    pub fn set_keymap(&mut self, keymap: KeyMap) {
        self.keymap = keymap;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: zero or more fixed updates, then one render pass.
    ///
    /// Queued events are applied on the first update of the frame; later
    /// updates in the same frame see only held state. Frames that run no
    /// update keep the queue for the next one.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            if step == 0 {
                self.input.drain_into(&mut self.buttons, &self.keymap);
            } else {
                self.buttons.advance(&[], &self.keymap);
            }
            self.game.update(&mut self.ctx, &self.buttons);
            self.ctx.advance_tick();
        }

        self.draw.clear();
        {
            let mut render_ctx = RenderContext::new(&mut self.draw);
            if let Some(manifest) = self.manifest.as_ref() {
                render_ctx = render_ctx.with_sprites(manifest);
            }
            self.game.render(&mut render_ctx);
        }

        self.draw_json = match self.draw.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize draw list: {}", e);
                String::from("[]")
            }
        };

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    /// Install a sprite manifest. Malformed manifests are logged and ignored.
    pub fn load_manifest(&mut self, json: &str) {
        match SpriteManifest::from_json(json) {
            Ok(manifest) => {
                log::info!(
                    "manifest loaded: {} sheets, {} sprites",
                    manifest.sheets.len(),
                    manifest.sprites.len()
                );
                self.manifest = Some(manifest);
            }
            Err(e) => log::warn!("ignoring malformed manifest: {}", e),
        }
    }

    /// Forward a host document (e.g. level JSON) to the game.
    pub fn load_data(&mut self, json: &str) {
        self.game.load_data(&mut self.ctx, json);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn tick_count(&self) -> u64 {
        self.ctx.tick()
    }

    // ---- Frame output accessors ----

    pub fn draw_list_json(&self) -> &str {
        &self.draw_json
    }

    pub fn draw_command_count(&self) -> u32 {
        self.draw.len() as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn sound_events(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn game_events(&self) -> &[f32] {
        bytemuck::cast_slice(&self.ctx.events)
    }

    // ---- Configuration accessors ----

    pub fn viewport_width(&self) -> f32 {
        self.config.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.config.viewport_height
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
