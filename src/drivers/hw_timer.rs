//! Day-window tick timer using ESP-IDF's esp_timer API.
//!
//! A periodic timer feeds [`SIGNALS.on_tick`](crate::signals::SharedSignals::on_tick)
//! with the configured tick period, carried in the callback argument.
//! The callback runs in the esp_timer task (not an ISR) and only touches
//! atomics.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut DAY_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn day_tick_cb(arg: *mut core::ffi::c_void) {
    crate::signals::SIGNALS.on_tick(arg as usize as u32);
}

/// Start the day-window timer with a `period_ms` tick.  Runs from boot,
/// armed or not.
#[cfg(target_os = "espidf")]
pub fn start_timers(period_ms: u32) {
    // SAFETY: DAY_TIMER is written here once at boot from the main task
    // before the callback can fire.  The callback only touches atomics.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(day_tick_cb),
            arg: period_ms as usize as *mut core::ffi::c_void,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"day_window\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut DAY_TIMER);
        if ret != ESP_OK {
            log::error!("hw_timer: day timer create failed (rc={}), no daily rollover", ret);
            return;
        }
        let ret = esp_timer_start_periodic(DAY_TIMER, u64::from(period_ms) * 1000);
        if ret != ESP_OK {
            log::error!("hw_timer: day timer start failed (rc={})", ret);
            return;
        }

        info!("hw_timer: day window tick @{}ms started", period_ms);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_timers(period_ms: u32) {
    log::info!(
        "hw_timer(sim): {}ms tick not started (ticks injected by the caller)",
        period_ms
    );
}
