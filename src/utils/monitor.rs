use crate::domain::model::UserInfo;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Error,
    PageView,
    Custom,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackedEvent {
    pub kind: EventKind,
    pub name: String,
    pub detail: Option<String>,
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// 錯誤回報與頁面/事件追蹤
///
/// A disabled tracker is silent. An enabled one logs each call through
/// `tracing` and buffers it until [`flush`](Self::flush).
#[derive(Debug, Clone)]
pub struct EventTracker {
    events: Arc<Mutex<Vec<TrackedEvent>>>,
    enabled: bool,
}

impl EventTracker {
    pub fn new(enabled: bool) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Callers log the failure themselves; this only records it.
    pub fn capture_error(&self, message: &str, context: Option<&str>) {
        if !self.enabled {
            return;
        }
        tracing::debug!(context = context.unwrap_or("-"), "📡 Captured error: {}", message);
        self.record(EventKind::Error, message, context.map(str::to_string), None);
    }

    pub fn track_page_view(&self, path: &str, user: Option<&UserInfo>) {
        if !self.enabled {
            return;
        }
        let user = user.and_then(UserInfo::display_name).map(str::to_string);
        tracing::info!(
            user = user.as_deref().unwrap_or("<anonymous>"),
            "📄 Page view: {}",
            path
        );
        self.record(EventKind::PageView, path, None, user);
    }

    pub fn track_event(&self, name: &str, detail: Option<&str>) {
        if !self.enabled {
            return;
        }
        tracing::info!(detail = detail.unwrap_or("-"), "📊 Event: {}", name);
        self.record(EventKind::Custom, name, detail.map(str::to_string), None);
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// 送出緩衝中的事件，每筆一行 JSON；回傳送出的筆數
    pub fn flush(&self) -> usize {
        let drained: Vec<TrackedEvent> = match self.events.lock() {
            Ok(mut events) => events.drain(..).collect(),
            Err(_) => return 0,
        };

        for event in &drained {
            match serde_json::to_string(event) {
                Ok(line) => tracing::info!(event = %line, "📤 Reporting tracked event"),
                Err(e) => tracing::warn!("Failed to serialize tracked event: {}", e),
            }
        }
        drained.len()
    }

    fn record(&self, kind: EventKind, name: &str, detail: Option<String>, user: Option<String>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(TrackedEvent {
                kind,
                name: name.to_string(),
                detail,
                user,
                timestamp: Utc::now(),
            });
        }
    }
}

impl Default for EventTracker {
    fn default() -> Self {
        Self::new(false)
    }
}
