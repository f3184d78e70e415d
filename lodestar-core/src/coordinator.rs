//! Main loop coordinator
//!
//! Owns every piece of telemetry state and runs one cooperative tick at a
//! time. The board's outer loop sleeps `tick_interval_ms()` between calls
//! and passes in whatever input and link events arrived meanwhile.
//!
//! Tick order:
//! 1. input events to the view selector, link events to the relay
//! 2. drain sensor bytes into the snapshot
//! 3. render the current view
//! 4. radio transmit
//! 5. position persistence
//! 6. liveness check (a fault replaces the rendered view)
//!
//! Every step runs even if an earlier one failed, and steps 3-5 all read
//! the snapshot produced by step 2 of the same tick.

use lodestar_display::{present, DisplayError, DisplaySurface, DrawList};
use lodestar_hal::{KeyValueStore, RadioLink, SensorSerial};

use crate::config::{ConfigError, TelemetryConfig};
use crate::feed::{DrainStats, FaultKind, FeedReconciler, LivenessMonitor, SensorDecoder};
use crate::fix::FixSnapshot;
use crate::input::{GestureClassifier, InputEvent};
use crate::persist::{LastKnownPosition, PersistOutcome, PersistenceController};
use crate::radio::{LinkEvent, LinkState, RelayController, TxOutcome};
use crate::view::{BrightnessLevel, DisplayMode, Renderer, ViewChange, ViewContext, ViewSelector};

/// External collaborators borrowed for one tick
pub struct Collaborators<'a, S, D, K, R, V>
where
    S: SensorSerial + ?Sized,
    D: SensorDecoder + ?Sized,
    K: KeyValueStore + ?Sized,
    R: RadioLink + ?Sized,
    V: DisplaySurface + ?Sized,
{
    pub serial: &'a mut S,
    pub decoder: &'a mut D,
    pub store: &'a mut K,
    pub radio: &'a mut R,
    pub display: &'a mut V,
}

/// Events gathered since the previous tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Already classified button gestures
    pub inputs: &'a [InputEvent],
    /// Connection events from the radio stack, oldest first
    pub link_events: &'a [LinkEvent],
    /// Raw debounced button level, classified by the built-in gesture
    /// classifier when the board does not classify presses itself
    pub button_pressed: Option<bool>,
}

/// What one tick did
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Frame handed to the display
    pub draw: DrawList,
    pub mode: DisplayMode,
    pub brightness: BrightnessLevel,
    pub drain: DrainStats,
    pub tx: TxOutcome,
    pub persist: PersistOutcome,
    /// Active sensor fault; `draw` is the error view when set
    pub fault: Option<FaultKind>,
    /// Display failure while presenting `draw`
    pub display_error: Option<DisplayError>,
}

/// Telemetry core context
pub struct Telemetry {
    config: TelemetryConfig,
    snapshot: FixSnapshot,
    reconciler: FeedReconciler,
    liveness: LivenessMonitor,
    selector: ViewSelector,
    gestures: GestureClassifier,
    persistence: PersistenceController,
    relay: RelayController,
    renderer: Renderer,
}

impl Telemetry {
    /// Build the context and restore persisted state
    ///
    /// `now_ms` starts the liveness grace period. Only an invalid
    /// configuration is an error; unreadable storage just means defaults.
    pub fn new<K: KeyValueStore + ?Sized>(
        config: TelemetryConfig,
        now_ms: u32,
        store: &mut K,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let restored = PersistenceController::restore(store);
        info!(
            "telemetry start: brightness {}, last position {}",
            restored.brightness.index(),
            restored.last_known.has_value()
        );

        Ok(Self {
            snapshot: FixSnapshot::new(),
            reconciler: FeedReconciler::new(usize::from(config.max_bytes_per_tick)),
            liveness: LivenessMonitor::new(config.liveness, now_ms),
            selector: ViewSelector::new(restored.brightness),
            gestures: GestureClassifier::new(config.long_press_ms),
            persistence: PersistenceController::new(
                config.persist_interval_ms,
                restored.last_known,
            ),
            relay: RelayController::new(config.transmit_interval_ms, config.device.clone()),
            renderer: Renderer::new(config.heading_min_speed_kmh),
            config,
        })
    }

    /// Load the stored configuration, then build the context
    pub fn from_store<K: KeyValueStore + ?Sized>(
        now_ms: u32,
        store: &mut K,
    ) -> Result<Self, ConfigError> {
        let config = TelemetryConfig::load(store);
        Self::new(config, now_ms, store)
    }

    /// Nominal sleep between ticks (ms)
    pub fn tick_interval_ms(&self) -> u32 {
        self.config.tick_interval_ms
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &FixSnapshot {
        &self.snapshot
    }

    pub fn last_known(&self) -> LastKnownPosition {
        self.persistence.last_known()
    }

    pub fn mode(&self) -> DisplayMode {
        self.selector.mode()
    }

    pub fn brightness(&self) -> BrightnessLevel {
        self.selector.brightness()
    }

    pub fn link_state(&self) -> LinkState {
        self.relay.state()
    }

    /// Run one loop iteration
    pub fn tick<S, D, K, R, V>(
        &mut self,
        now_ms: u32,
        input: &TickInput<'_>,
        collab: &mut Collaborators<'_, S, D, K, R, V>,
    ) -> TickReport
    where
        S: SensorSerial + ?Sized,
        D: SensorDecoder + ?Sized,
        K: KeyValueStore + ?Sized,
        R: RadioLink + ?Sized,
        V: DisplaySurface + ?Sized,
    {
        // 1. Input and link events
        for &event in input.inputs {
            self.dispatch_input(event, &mut *collab.store);
        }
        if let Some(pressed) = input.button_pressed {
            if let Some(event) = self.gestures.update(pressed, now_ms) {
                self.dispatch_input(event, &mut *collab.store);
            }
        }
        for &event in input.link_events {
            self.relay.on_event(event, now_ms, &mut *collab.radio);
        }

        // 2. Sensor feed
        let drain = self
            .reconciler
            .drain(&mut *collab.serial, &mut *collab.decoder, &mut self.snapshot);

        // 3. Render
        let mode = self.selector.mode();
        let ctx = ViewContext {
            snapshot: &self.snapshot,
            last_known: self.persistence.last_known(),
            connected: self.relay.is_connected(),
        };
        let mut draw = self.renderer.render(mode, &ctx);

        // 4. Radio
        let tx = self.relay.tick(now_ms, &self.snapshot, &mut *collab.radio);

        // 5. Persistence
        let persist = self
            .persistence
            .maybe_persist(now_ms, &self.snapshot, &mut *collab.store);

        // 6. Liveness
        let fault = self
            .liveness
            .check(now_ms, self.snapshot.bytes_processed())
            .fault();
        if let Some(kind) = fault {
            draw = self
                .renderer
                .render_fault(kind, self.snapshot.bytes_processed());
        }

        let brightness = self.selector.brightness();
        let display_error = match present(&mut *collab.display, &draw, brightness.intensity()) {
            Ok(()) => None,
            Err(e) => {
                warn!("display present failed: {}", e);
                Some(e)
            }
        };

        TickReport {
            draw,
            mode,
            brightness,
            drain,
            tx,
            persist,
            fault,
            display_error,
        }
    }

    fn dispatch_input<K: KeyValueStore + ?Sized>(&mut self, event: InputEvent, store: &mut K) {
        if let Some(ViewChange::BrightnessChanged(level)) = self.selector.handle(event) {
            // Failure already logged; the selector keeps the new level
            let _ = self.persistence.persist_brightness(level, store);
        }
    }
}
