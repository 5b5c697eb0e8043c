// src/report.rs
// =============================================================================
// The run-wide report accumulator and its rendered text form.
//
// This is the only state shared across document tasks, so it is the only
// place that needs a lock. Appends are cheap and the lists are append-only;
// ordering between concurrently-completing tasks is a race by design.
// =============================================================================

use std::sync::Mutex;

#[derive(Debug, Default)]
struct ReportInner {
    substitutions: Vec<(String, String)>,
    failures: Vec<String>,
    persistence_failures: usize,
}

/// Thread-safe accumulator for the whole run. Built incrementally by the
/// document tasks, rendered once after they have all joined.
#[derive(Debug, Default)]
pub struct RunReport {
    inner: Mutex<ReportInner>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one healed link (original -> archived).
    pub fn record_substitution(&self, original: String, archived: String) {
        let mut inner = self.inner.lock().expect("report lock poisoned");
        inner.substitutions.push((original, archived));
    }

    /// Records one link that could not be archived.
    pub fn record_failure(&self, original: String) {
        let mut inner = self.inner.lock().expect("report lock poisoned");
        inner.failures.push(original);
    }

    /// Records one document whose rewrites could not be written back.
    pub fn record_persistence_failure(&self) {
        let mut inner = self.inner.lock().expect("report lock poisoned");
        inner.persistence_failures += 1;
    }

    pub fn substitution_count(&self) -> usize {
        self.inner.lock().expect("report lock poisoned").substitutions.len()
    }

    pub fn failure_count(&self) -> usize {
        self.inner.lock().expect("report lock poisoned").failures.len()
    }

    pub fn substitutions(&self) -> Vec<(String, String)> {
        self.inner.lock().expect("report lock poisoned").substitutions.clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.inner.lock().expect("report lock poisoned").failures.clone()
    }

    pub fn persistence_failure_count(&self) -> usize {
        self.inner.lock().expect("report lock poisoned").persistence_failures
    }

    /// Process exit code for the run: 0 for a clean run, 1 when unresolvable
    /// links remain or a document's fixes could not be written back.
    pub fn exit_code(&self) -> i32 {
        let inner = self.inner.lock().expect("report lock poisoned");
        if inner.failures.is_empty() && inner.persistence_failures == 0 {
            0
        } else {
            1
        }
    }

    /// Renders the final report text: a header with both counts, the
    /// substitution list, and (when any exist) the unresolvable originals.
    /// Always produced, even for an empty run.
    pub fn render(&self) -> String {
        let inner = self.inner.lock().expect("report lock poisoned");

        let mut text = format!(
            "linkrot identified {} broken links ({} could not be archived).\n\n\
             These links have been replaced with archived versions. \
             See below for the changes made.\n",
            inner.substitutions.len(),
            inner.failures.len(),
        );

        for (original, archived) in &inner.substitutions {
            text.push_str(&format!("\n* {original} -> {archived}"));
        }

        if !inner.failures.is_empty() {
            text.push_str("\n\nThe following links could not be archived:\n");
            for original in &inner.failures {
                text.push_str(&format!("\n* {original}"));
            }
        }

        if inner.persistence_failures > 0 {
            text.push_str(&format!(
                "\n\n{} documents could not be rewritten on disk; their fixes are not saved.",
                inner.persistence_failures
            ));
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_render_lists_substitutions_and_failures() {
        let report = RunReport::new();
        report.record_substitution("https://a".to_string(), "https://archive/a".to_string());
        report.record_failure("https://b".to_string());

        let text = report.render();
        assert!(text.starts_with("linkrot identified 1 broken links (1 could not be archived)."));
        assert!(text.contains("* https://a -> https://archive/a"));
        assert!(text.contains("The following links could not be archived:"));
        assert!(text.contains("* https://b"));
    }

    #[test]
    fn test_empty_run_still_renders() {
        let text = RunReport::new().render();
        assert!(text.contains("identified 0 broken links"));
        assert!(!text.contains("could not be archived:"));
        assert!(!text.contains("rewritten on disk"));
    }

    #[test]
    fn test_exit_code_reflects_remaining_failures() {
        let clean = RunReport::new();
        clean.record_substitution("https://a".to_string(), "https://archive/a".to_string());
        assert_eq!(clean.exit_code(), 0);

        let with_failure = RunReport::new();
        with_failure.record_failure("https://b".to_string());
        assert_eq!(with_failure.exit_code(), 1);
    }

    #[test]
    fn test_persistence_failures_count_against_the_run() {
        let report = RunReport::new();
        report.record_substitution("https://a".to_string(), "https://archive/a".to_string());
        report.record_persistence_failure();

        assert_eq!(report.persistence_failure_count(), 1);
        // A fix that never reached disk is not a clean run.
        assert_eq!(report.exit_code(), 1);
        assert!(report
            .render()
            .contains("1 documents could not be rewritten on disk"));
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let report = Arc::new(RunReport::new());
        let threads = 8;
        let appends_per_thread = 100;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let report = Arc::clone(&report);
                std::thread::spawn(move || {
                    for i in 0..appends_per_thread {
                        report.record_substitution(
                            format!("https://dead/{t}/{i}"),
                            format!("https://archive/{t}/{i}"),
                        );
                        report.record_failure(format!("https://failed/{t}/{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(report.substitution_count(), threads * appends_per_thread);
        assert_eq!(report.failure_count(), threads * appends_per_thread);
    }
}
