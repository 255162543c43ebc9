//! Interruption handler.

use oat_core::termination::StopRequest;

/// Routes Ctrl+C (and termination signals) to the stop request of the run, so that the run
/// stops at the next check point and still reports its best solution.
pub fn set_interruption_handler(request: StopRequest) -> Result<(), String> {
    ctrlc::set_handler(move || request.request_stop())
        .map_err(|err| format!("cannot set interruption handler: '{err}'"))
}
