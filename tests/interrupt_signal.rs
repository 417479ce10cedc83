#![cfg(unix)]
//! Runs in its own test binary: the SIGINT handler is process-wide.

use std::time::{Duration, Instant};

use ecco::signal::{install_interrupt_handler, send_interrupt};
use ecco::CancelToken;

#[test]
fn test_sigint_to_self_cancels_interrupt_token() {
    install_interrupt_handler().expect("install handler");
    let token = CancelToken::interrupt();
    let local = CancelToken::new();
    assert!(!token.is_cancelled());

    send_interrupt(std::process::id()).expect("send SIGINT");

    // Delivery to another thread of this process is asynchronous
    let deadline = Instant::now() + Duration::from_secs(5);
    while !token.is_cancelled() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(token.is_cancelled(), "SIGINT did not reach the interrupt token");
    assert!(
        CancelToken::interrupt().is_cancelled(),
        "fresh interrupt handles share the flag"
    );
    assert!(!local.is_cancelled(), "local tokens ignore SIGINT");
}
