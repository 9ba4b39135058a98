//! Concrete gate handler functions and table builder.
//!
//! ```text
//!  IDLE ──[first press of the day, auto-water off]──▶ ARMED_TODAY
//!    ▲                                                    │
//!    │                          [temp < max, light in window, moisture > 0,
//!    │                                 auto-water off]
//!    │                                                    ▼
//!    └──────────────[pulse delivered]─────────────── CYCLE_ACTIVE
//!
//!  CYCLE_ACTIVE ──[pulse failed]──▶ ARMED_TODAY
//!
//!  Any state ──[24 h rollover]──▶ IDLE (daily state cleared)
//! ```

use super::context::GateContext;
use super::{GateState, StateDescriptor};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; GateState::COUNT] {
    [
        StateDescriptor {
            id: GateState::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        StateDescriptor {
            id: GateState::ArmedToday,
            name: "ArmedToday",
            on_enter: Some(armed_enter),
            on_exit: None,
            on_update: armed_update,
        },
        StateDescriptor {
            id: GateState::CycleActive,
            name: "CycleActive",
            on_enter: Some(cycle_enter),
            on_exit: Some(cycle_exit),
            on_update: cycle_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut GateContext) {
    ctx.commands.pump_on = false;
}

fn idle_update(ctx: &mut GateContext) -> Option<GateState> {
    if !ctx.press_pending || ctx.auto_water_enabled {
        return None;
    }
    // Only the first counted press of the day arms.
    if ctx.presses_today == 1 && !ctx.watered_today {
        return Some(GateState::ArmedToday);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ARMED_TODAY: waiting for the environmental window
// ═══════════════════════════════════════════════════════════════════════════

fn armed_enter(ctx: &mut GateContext) {
    ctx.daily_water_armed = true;
    info!("GATE: armed for today");
}

fn armed_update(ctx: &mut GateContext) -> Option<GateState> {
    if ctx.auto_water_enabled {
        return None;
    }
    if ctx.watering_window_open() {
        info!(
            "GATE: window open (temp {}%, light {}%, moisture {}%)",
            ctx.reading.temperature_pct, ctx.reading.light_pct, ctx.reading.moisture_pct
        );
        return Some(GateState::CycleActive);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CYCLE_ACTIVE: the controller runs the pump pulse
// ═══════════════════════════════════════════════════════════════════════════

fn cycle_enter(ctx: &mut GateContext) {
    ctx.daily_water_armed = false;
    ctx.pulse_delivered = false;
    ctx.pulse_failed = false;
    ctx.commands.pump_on = true;
    info!("GATE: pump pulse {} ms", ctx.config.pump_pulse_ms);
}

fn cycle_exit(ctx: &mut GateContext) {
    ctx.commands.pump_on = false;
    if ctx.pulse_delivered {
        ctx.watered_today = true;
    }
    ctx.pulse_delivered = false;
    ctx.pulse_failed = false;
}

fn cycle_update(ctx: &mut GateContext) -> Option<GateState> {
    if ctx.pulse_delivered {
        return Some(GateState::Idle);
    }
    if ctx.pulse_failed {
        return Some(GateState::ArmedToday);
    }
    None
}
