use std::fs;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::task::Task;

pub trait TaskStore: Send + Sync {
    fn load_all(&self) -> Vec<Task>;
    fn save_all(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TaskStore for JsonStore {
    fn load_all(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("could not read {:?}, starting empty: {}", self.path, err);
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(err) => {
                log::warn!("corrupt task file {:?}, starting empty: {}", self.path, err);
                Vec::new()
            }
        }
    }

    fn save_all(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(tasks)?;
        // Write aside and rename so a concurrent reader never sees a torn file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

#[cfg(test)]
pub struct MemoryStore {
    tasks: std::sync::Mutex<Vec<Task>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tasks: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl TaskStore for MemoryStore {
    fn load_all(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    fn save_all(&self, tasks: &[Task]) -> Result<(), StoreError> {
        *self.tasks.lock().unwrap() = tasks.to_vec();
        Ok(())
    }
}
