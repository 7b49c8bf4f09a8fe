//! Pointer-capture toggle handling.

use tracing::info;

/// Requests the embedding host must act on; this crate cannot reach the
/// platform's pointer APIs itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    PointerLockRequest(bool),
}

/// Flip the capture flag and queue the matching host request.
pub fn handle_capture_toggle(captured: &mut bool, out: &mut Vec<HostEvent>) {
    *captured = !*captured;
    info!(target: "controls", captured = *captured, reason = "toggle_key");
    out.push(HostEvent::PointerLockRequest(*captured));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_requests_lock() {
        let mut captured = false;
        let mut ev = Vec::new();
        handle_capture_toggle(&mut captured, &mut ev);
        assert!(captured);
        assert_eq!(ev, vec![HostEvent::PointerLockRequest(true)]);
        handle_capture_toggle(&mut captured, &mut ev);
        assert!(!captured);
        assert_eq!(ev.last(), Some(&HostEvent::PointerLockRequest(false)));
    }
}
