use std::sync::Mutex;

/// Transient list of users the bot passively backs up with a reaction.
///
/// Ordered and duplicate-tolerant. Withdrawing blanks the matching slots in
/// place instead of removing them, so the sequence only grows within a
/// process lifetime. A blank slot never matches a real name.
#[derive(Debug, Default)]
pub struct SupportList {
    entries: Mutex<Vec<String>>,
}

impl SupportList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name`, even if it is already present.
    pub fn add(&self, name: &str) {
        self.entries.lock().unwrap().push(name.to_string());
    }

    /// Blanks every slot holding `name`.
    pub fn withdraw(&self, name: &str) {
        let mut entries = self.entries.lock().unwrap();
        for entry in entries.iter_mut() {
            if entry == name {
                entry.clear();
            }
        }
    }

    /// Exact-match membership query.
    pub fn needs_support(&self, name: &str) -> bool {
        self.entries.lock().unwrap().iter().any(|entry| entry == name)
    }

    /// The raw sequence joined by `sep`, blank slots included.
    pub fn joined(&self, sep: &str) -> String {
        self.entries.lock().unwrap().join(sep)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
