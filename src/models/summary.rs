/// Per-target outcome counters for one install or update run
///
/// Counters only ever grow; they are driven by the executor's per-item
/// outcomes and never re-derived from the existence matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub installed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl InstallSummary {
    pub fn record_installed(&mut self) {
        self.installed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.installed + self.skipped + self.failed
    }
}
