/// Dual-acknowledgement gate in front of every surcharged emergency request.
///
/// Consent never persists: a successful confirm, a cancel, or closing the
/// dialog by any path resets both flags, so a new emergency request can never
/// silently reuse a prior acknowledgement.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    genuine_emergency: bool,
    surcharge_understood: bool,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acknowledge_genuine_emergency(&mut self, value: bool) {
        self.genuine_emergency = value;
    }

    pub fn acknowledge_surcharge(&mut self, value: bool) {
        self.surcharge_understood = value;
    }

    pub fn is_ready(&self) -> bool {
        self.genuine_emergency && self.surcharge_understood
    }

    /// Runs `submit` once, only when both acknowledgements are set. Returns
    /// whether the submission fired. Either way the gate ends closed.
    pub fn confirm<F>(&mut self, submit: F) -> bool
    where
        F: FnOnce(),
    {
        if !self.is_ready() {
            return false;
        }

        submit();
        self.reset();
        true
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.genuine_emergency = false;
        self.surcharge_understood = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_is_a_no_op_unless_both_flags_set() {
        let mut gate = ConfirmationGate::new();
        let mut fired = 0;

        assert!(!gate.confirm(|| fired += 1));

        gate.acknowledge_genuine_emergency(true);
        assert!(!gate.confirm(|| fired += 1));

        gate.acknowledge_surcharge(true);
        assert!(gate.confirm(|| fired += 1));
        assert_eq!(fired, 1);
    }

    #[test]
    fn flags_reset_after_successful_confirm() {
        let mut gate = ConfirmationGate::new();
        gate.acknowledge_genuine_emergency(true);
        gate.acknowledge_surcharge(true);

        assert!(gate.confirm(|| {}));
        assert!(!gate.is_ready());

        // A second confirm must not reuse the earlier consent.
        assert!(!gate.confirm(|| panic!("consent must not persist")));
    }

    #[test]
    fn cancel_resets_partial_consent() {
        let mut gate = ConfirmationGate::new();
        gate.acknowledge_genuine_emergency(true);

        gate.cancel();

        gate.acknowledge_surcharge(true);
        assert!(!gate.is_ready());
    }

    #[test]
    fn acknowledgements_can_be_withdrawn() {
        let mut gate = ConfirmationGate::new();
        gate.acknowledge_genuine_emergency(true);
        gate.acknowledge_surcharge(true);
        gate.acknowledge_surcharge(false);

        assert!(!gate.is_ready());
    }
}
