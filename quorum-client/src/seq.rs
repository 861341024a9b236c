/// Ticket for one "fetch then replace everything" refresh.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Generation(u64);

/// Orders thread-list refreshes so a late-arriving stale response cannot
/// overwrite state produced by a newer request.
///
/// `begin` before sending the request, keep the [`Generation`] with the
/// in-flight future, and only apply the response if `admit` still accepts it:
/// anything but the most recently issued generation was superseded and must
/// be discarded.
#[derive(Debug, Default)]
pub struct RefreshSequence {
    issued: u64,
}

impl RefreshSequence {
    pub fn new() -> RefreshSequence {
        RefreshSequence::default()
    }

    pub fn begin(&mut self) -> Generation {
        self.issued += 1;
        Generation(self.issued)
    }

    pub fn admit(&self, generation: Generation) -> bool {
        generation.0 == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_generation_is_admitted() {
        let mut seq = RefreshSequence::new();
        let g1 = seq.begin();
        assert!(seq.admit(g1));
        // responses may be admitted several times (refresh after create/delete
        // reuses the same guard)
        assert!(seq.admit(g1));
    }

    #[test]
    fn superseded_generation_is_discarded() {
        let mut seq = RefreshSequence::new();
        let g1 = seq.begin();
        let g2 = seq.begin();
        // g1's response arrives after g2 was issued: stale, discard
        assert!(!seq.admit(g1));
        assert!(seq.admit(g2));
    }

    #[test]
    fn stale_generation_stays_stale_even_if_newer_request_failed() {
        let mut seq = RefreshSequence::new();
        let g1 = seq.begin();
        let _g2 = seq.begin();
        // even if g2's request errors out, g1 was superseded the moment g2
        // was issued
        assert!(!seq.admit(g1));
    }
}
