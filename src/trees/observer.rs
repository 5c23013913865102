//! Hooks for following tree induction as it happens.

/// Receives events while a tree is being grown. Every method defaults to doing nothing.
///
/// `depth` is the number of decision nodes above the event, so the root is at depth 0.
pub trait TreeObserver {
    /// The class entropy of a node fell below the threshold.
    fn leaf(&mut self, _depth: usize, _class: &str, _records: usize) {}

    /// No candidate attribute had a present value, so the node became its majority class.
    fn exhausted(&mut self, _depth: usize, _class: &str, _records: usize) {}

    /// A node splits on `attr`.
    fn split(&mut self, _depth: usize, _attr: &str, _gain: f64) {}

    /// A child of the node at `depth` is about to be grown from `records` records.
    fn branch(&mut self, _depth: usize, _attr: &str, _value: &str, _records: usize) {}
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentObserver;

impl TreeObserver for SilentObserver {}

/// Narrates induction on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrintObserver;

impl TreeObserver for PrintObserver {
    fn split(&mut self, depth: usize, attr: &str, gain: f64) {
        println!(
            "{:indent$}Decision tree based on {} (gain {:.4}).",
            "",
            attr,
            gain,
            indent = 2 * depth
        );
    }

    fn branch(&mut self, depth: usize, attr: &str, value: &str, records: usize) {
        println!(
            "{:indent$}  Finding child for {}={} with {} items.",
            "",
            attr,
            value,
            records,
            indent = 2 * depth
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::TreeObserver;

    /// Records every event as a line of text.
    #[derive(Default)]
    pub(crate) struct EventLog(pub Vec<String>);

    impl TreeObserver for EventLog {
        fn leaf(&mut self, depth: usize, class: &str, records: usize) {
            self.0.push(format!("{depth} leaf {class} ({records})"));
        }

        fn exhausted(&mut self, depth: usize, class: &str, records: usize) {
            self.0.push(format!("{depth} exhausted {class} ({records})"));
        }

        fn split(&mut self, depth: usize, attr: &str, _gain: f64) {
            self.0.push(format!("{depth} split {attr}"));
        }

        fn branch(&mut self, depth: usize, attr: &str, value: &str, records: usize) {
            self.0.push(format!("{depth} branch {attr}={value} ({records})"));
        }
    }

    #[test]
    fn test_event_log() {
        let mut log = EventLog::default();
        log.split(0, "A", 0.5);
        log.branch(0, "A", "x", 3);
        log.leaf(1, "yes", 3);
        assert_eq!(log.0, vec!["0 split A", "0 branch A=x (3)", "1 leaf yes (3)"]);
    }
}
