/// Single-entry history backing the `prev` built-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrevSlot {
    line: Option<String>,
}

impl PrevSlot {
    pub fn new() -> Self {
        Self { line: None }
    }

    // Overwrites the slot; blank lines are ignored
    pub fn record(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        self.line = Some(trimmed.to_string());
    }

    pub fn get(&self) -> Option<&str> {
        self.line.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let prev = PrevSlot::new();
        assert!(prev.is_empty());
        assert_eq!(prev.get(), None);
    }

    #[test]
    fn test_record_overwrites() {
        let mut prev = PrevSlot::new();
        prev.record("echo a");
        prev.record("  echo b  ");
        assert_eq!(prev.get(), Some("echo b"));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let mut prev = PrevSlot::new();
        prev.record("ls");
        prev.record("   ");
        assert_eq!(prev.get(), Some("ls"));
    }
}
