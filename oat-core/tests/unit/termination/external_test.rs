use super::*;
use std::thread;

#[test]
fn can_fire_after_request() {
    let request = StopRequest::new();
    let mut condition = ExternalStop::new(request.clone());
    let statistics = RunStatistics::new(true);

    assert!(!condition.is_termination(&statistics));

    request.request_stop();

    assert!(condition.is_termination(&statistics));
    assert!(request.is_requested());
}

#[test]
fn can_release_waiter_when_run_is_finished() {
    let request = StopRequest::new();
    let mut condition = ExternalStop::new(request.clone());

    let run = thread::spawn(move || {
        let statistics = RunStatistics::new(true);
        while !condition.is_termination(&statistics) {
            thread::sleep(Duration::from_millis(1));
        }
        condition.on_run_finished();
    });

    request.request_stop_and_wait();

    assert!(request.is_finished());
    run.join().unwrap();
}

#[test]
fn can_time_out_waiting_for_unfinished_run() {
    let request = StopRequest::new();
    let _condition = ExternalStop::new(request.clone());

    let is_finished = request.request_stop_and_wait_timeout(Duration::from_millis(10));

    assert!(!is_finished);
    assert!(request.is_requested());
}

#[test]
fn can_keep_pending_request_on_reset() {
    let request = StopRequest::new();
    let mut condition = ExternalStop::new(request.clone());
    condition.on_run_finished();
    request.request_stop();

    condition.reset();

    assert!(!request.is_finished());
    assert!(condition.is_termination(&RunStatistics::new(true)));

    request.clear();
    assert!(!condition.is_termination(&RunStatistics::new(true)));
}

#[test]
fn can_consume_request_when_run_is_finished() {
    let request = StopRequest::new();
    let mut condition = ExternalStop::new(request.clone());
    request.request_stop();
    assert!(condition.is_termination(&RunStatistics::new(true)));

    condition.on_run_finished();

    assert!(request.is_finished());
    assert!(!request.is_requested());
}

#[test]
fn can_skip_request_when_waiting_on_finished_run() {
    let request = StopRequest::new();
    let mut condition = ExternalStop::new(request.clone());
    condition.on_run_finished();

    request.request_stop_and_wait();

    assert!(request.request_stop_and_wait_timeout(Duration::from_millis(1)));
    assert!(!request.is_requested());
    condition.reset();
    assert!(!condition.is_termination(&RunStatistics::new(true)));
}
