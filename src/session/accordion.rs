/// Expansion state for the question list. At most one block is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    /// Close `block` if it is open; otherwise open it and close the rest.
    pub fn toggle(&mut self, block: usize) {
        self.open = if self.open == Some(block) {
            None
        } else {
            Some(block)
        };
    }

    /// Collapse everything except `block`, which is expanded.
    pub fn expand_only(&mut self, block: usize) {
        self.open = Some(block);
    }

    pub fn collapse_all(&mut self) {
        self.open = None;
    }

    #[must_use]
    pub fn is_open(&self, block: usize) -> bool {
        self.open == Some(block)
    }

    #[must_use]
    pub fn open_block(&self) -> Option<usize> {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_opens_one_block_at_a_time() {
        let mut accordion = Accordion::default();
        accordion.toggle(1);
        assert!(accordion.is_open(1));
        accordion.toggle(2);
        assert!(!accordion.is_open(1));
        assert!(accordion.is_open(2));
        accordion.toggle(2);
        assert_eq!(accordion.open_block(), None);
    }
}
