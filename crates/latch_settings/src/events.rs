//! Change notifications
//!
//! Subscribers are called synchronously, in subscription order, after a
//! setting has been stored and applied.

use crate::model::{SettingKey, SettingValue};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettingChanged {
    pub key: SettingKey,
    pub value: SettingValue,
}

impl SettingChanged {
    pub fn name(&self) -> &'static str {
        self.key.name()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&SettingChanged)>;

pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn emit(&mut self, change: &SettingChanged) {
        for (_, callback) in &mut self.entries {
            callback(change);
        }
    }
}

impl Default for Subscribers {
    fn default() -> Self {
        Self::new()
    }
}
