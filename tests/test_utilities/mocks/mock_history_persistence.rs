use std::cell::RefCell;
use vuln_trend::prelude::*;

/// Mock HistoryPersistence keeping the saved state in memory
pub struct MockHistoryPersistence {
    pub saved: RefCell<Vec<ProjectHistory>>,
    pub save_count: RefCell<usize>,
}

impl MockHistoryPersistence {
    pub fn new() -> Self {
        Self {
            saved: RefCell::new(Vec::new()),
            save_count: RefCell::new(0),
        }
    }
}

impl HistoryPersistence for MockHistoryPersistence {
    fn save(&self, histories: &[ProjectHistory]) -> Result<()> {
        *self.saved.borrow_mut() = histories.to_vec();
        *self.save_count.borrow_mut() += 1;
        Ok(())
    }

    fn load(&self) -> Result<Vec<ProjectHistory>> {
        Ok(self.saved.borrow().clone())
    }
}
