//! Once-per-day watering gate.
//!
//! A function-pointer finite state machine, one row per state:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────────┬───────────┬──────────┬───────────────┐  │
//! │  │ GateState   │ on_enter  │ on_exit  │ on_update     │  │
//! │  ├─────────────┼───────────┼──────────┼───────────────┤  │
//! │  │ Idle        │ fn(ctx)   │ -        │ fn(ctx)->Opt  │  │
//! │  │ ArmedToday  │ fn(ctx)   │ -        │ fn(ctx)->Opt  │  │
//! │  │ CycleActive │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Opt  │  │
//! │  └─────────────┴───────────┴──────────┴───────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! [`WateringGate`] wraps the engine with the three inputs the controller
//! feeds it: a switch press, the per-iteration tick and the day rollover.
//! At most one pump pulse is requested between two rollovers.

pub mod context;
pub mod states;

pub use context::GateConfig;
use context::GateContext;
use log::info;

use crate::sensors::SensorReading;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GateState {
    Idle = 0,
    ArmedToday = 1,
    CycleActive = 2,
}

impl GateState {
    pub const COUNT: usize = 3;

    /// Convert an index back to `GateState`.  Out-of-range indices fall back
    /// to `Idle` (asserts in debug builds).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::ArmedToday,
            2 => Self::CycleActive,
            _ => {
                debug_assert!(false, "invalid gate state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

pub type StateActionFn = fn(&mut GateContext);

/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut GateContext) -> Option<GateState>;

pub struct StateDescriptor {
    pub id: GateState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    table: [StateDescriptor; GateState::COUNT],
    current: usize,
}

impl Fsm {
    /// Row `i` of `table` must describe `GateState::from_index(i)`.
    pub fn new(table: [StateDescriptor; GateState::COUNT], initial: GateState) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, row)| row.id as usize == i),
            "gate state table out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut GateContext) {
        info!("GATE: starting in {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Call `on_update` for the current state and follow the transition it
    /// returns, if any.
    pub fn tick(&mut self, ctx: &mut GateContext) {
        if let Some(next) = (self.table[self.current].on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    /// Jump to `next` regardless of what `on_update` would return.
    pub fn force_transition(&mut self, next: GateState, ctx: &mut GateContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> GateState {
        GateState::from_index(self.current)
    }

    fn transition(&mut self, next: GateState, ctx: &mut GateContext) {
        let next_idx = next as usize;
        info!(
            "GATE: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

// ---------------------------------------------------------------------------
// Gate facade
// ---------------------------------------------------------------------------

/// Result of a water-switch press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// First press of the day with auto-water off: the gate is armed.
    Armed,
    /// Auto-water is on; the press is rejected but still counted.
    Refused,
    /// Already armed or already used today.
    Ignored,
}

/// Point-in-time view of the gate for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSnapshot {
    pub state: GateState,
    pub auto_water_enabled: bool,
    pub watered_today: bool,
    pub daily_water_armed: bool,
    pub presses_today: u8,
}

pub struct WateringGate {
    fsm: Fsm,
    ctx: GateContext,
}

impl WateringGate {
    pub fn new(config: GateConfig) -> Self {
        let mut gate = Self {
            fsm: Fsm::new(states::build_state_table(), GateState::Idle),
            ctx: GateContext::new(config),
        };
        gate.fsm.start(&mut gate.ctx);
        gate
    }

    /// Handle a debounced water-switch press.  Every press counts towards
    /// the day, refused ones included, so only the first press can arm.
    pub fn press(&mut self, auto_water_enabled: bool) -> PressOutcome {
        self.ctx.auto_water_enabled = auto_water_enabled;
        self.ctx.presses_today = self.ctx.presses_today.saturating_add(1);
        if auto_water_enabled {
            return PressOutcome::Refused;
        }

        let before = self.fsm.current_state();
        self.ctx.press_pending = true;
        self.fsm.tick(&mut self.ctx);
        self.ctx.press_pending = false;

        if before == GateState::Idle && self.fsm.current_state() == GateState::ArmedToday {
            PressOutcome::Armed
        } else {
            PressOutcome::Ignored
        }
    }

    /// Evaluate the environmental window.  Returns `true` when the caller
    /// must run the pump pulse and then call [`finish_cycle`](Self::finish_cycle).
    pub fn tick(&mut self, reading: &SensorReading, auto_water_enabled: bool) -> bool {
        self.ctx.reading = *reading;
        self.ctx.auto_water_enabled = auto_water_enabled;
        self.fsm.tick(&mut self.ctx);
        self.ctx.commands.pump_on
    }

    /// Close an active cycle once the pulse has been delivered.
    pub fn finish_cycle(&mut self) {
        if self.fsm.current_state() != GateState::CycleActive {
            return;
        }
        self.ctx.pulse_delivered = true;
        self.fsm.tick(&mut self.ctx);
    }

    /// The pulse never started.  Back to `ArmedToday`; the day is not
    /// marked watered.
    pub fn abort_cycle(&mut self) {
        if self.fsm.current_state() != GateState::CycleActive {
            return;
        }
        self.ctx.pulse_failed = true;
        self.fsm.tick(&mut self.ctx);
    }

    /// 24 h window elapsed: back to `Idle` with the daily state cleared.
    pub fn on_day_rollover(&mut self) {
        self.fsm.force_transition(GateState::Idle, &mut self.ctx);
        self.ctx.reset_daily();
        info!("GATE: day rolled over");
    }

    pub fn state(&self) -> GateState {
        self.fsm.current_state()
    }

    pub fn pulse_ms(&self) -> u32 {
        self.ctx.config.pump_pulse_ms
    }

    pub fn snapshot(&self) -> GateSnapshot {
        GateSnapshot {
            state: self.fsm.current_state(),
            auto_water_enabled: self.ctx.auto_water_enabled,
            watered_today: self.ctx.watered_today,
            daily_water_armed: self.ctx.daily_water_armed,
            presses_today: self.ctx.presses_today,
        }
    }
}

impl Default for WateringGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}
