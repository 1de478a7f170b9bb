//! Deferred, cancellable task reminders.
//!
//! The scheduler owns a set of pending notifications, each backed by a
//! one-shot timer. Firing shows the notification through the injected
//! platform capability and removes the entry; cancelling aborts the timer
//! and removes the entry. Cancelling after firing finds nothing and is a
//! no-op.
//!
//! Both the clock and the platform capability are injected, so tests can
//! pin "now" and record shown notifications instead of touching the
//! desktop.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveDate};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::task::Task;

const DEFAULT_ICON: &str = "icons/campo-192.png";
const DEFAULT_BADGE: &str = "icons/campo-badge-72.png";
const DEFAULT_TAG: &str = "campo-reminder";

/// Notification permission, refreshed at scheduler construction and by
/// each permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

/// Payload for a shown notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyOptions {
    pub body: String,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub tag: Option<String>,
    /// Interactive action labels. Their activation is not wired back into
    /// the task store by this crate; that belongs to the presentation
    /// layer.
    pub actions: Vec<NotifyAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyAction {
    pub action: String,
    pub title: String,
}

impl NotifyOptions {
    pub fn with_body(body: impl Into<String>) -> Self {
        NotifyOptions {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Fill unset icon/badge/tag fields with the defaults.
    fn merged_defaults(mut self) -> Self {
        self.icon.get_or_insert_with(|| DEFAULT_ICON.to_string());
        self.badge.get_or_insert_with(|| DEFAULT_BADGE.to_string());
        self.tag.get_or_insert_with(|| DEFAULT_TAG.to_string());
        self
    }
}

/// Platform notification capability: permission handling and display.
#[async_trait]
pub trait NotifyCapability: Send + Sync {
    fn is_available(&self) -> bool;
    fn current_permission(&self) -> Permission;
    async fn request_permission(&self) -> Permission;
    fn show(&self, title: &str, options: &NotifyOptions);
}

/// Wall clock, injectable so tests can pin "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

struct Pending {
    scheduled_for: DateTime<Local>,
    handle: Option<JoinHandle<()>>,
}

/// Schedules, tracks and cancels deferred notifications.
pub struct NotificationScheduler {
    capability: Arc<dyn NotifyCapability>,
    clock: Arc<dyn Clock>,
    pending: Arc<Mutex<HashMap<String, Pending>>>,
    permission: Mutex<Permission>,
}

impl NotificationScheduler {
    pub fn new(capability: Arc<dyn NotifyCapability>) -> Self {
        Self::with_clock(capability, Arc::new(SystemClock))
    }

    pub fn with_clock(capability: Arc<dyn NotifyCapability>, clock: Arc<dyn Clock>) -> Self {
        let permission = if capability.is_available() {
            capability.current_permission()
        } else {
            Permission::Default
        };

        NotificationScheduler {
            capability,
            clock,
            pending: Arc::new(Mutex::new(HashMap::new())),
            permission: Mutex::new(permission),
        }
    }

    pub async fn permission(&self) -> Permission {
        *self.permission.lock().await
    }

    /// Prompt for permission and record the result. Returns whether the
    /// result is granted. When no notification capability is available,
    /// returns false without prompting.
    pub async fn request_permission(&self) -> bool {
        if !self.capability.is_available() {
            return false;
        }
        let result = self.capability.request_permission().await;
        *self.permission.lock().await = result;
        result == Permission::Granted
    }

    /// Schedule a notification to be shown after `delay_ms`.
    ///
    /// Returns `None` without scheduling when permission has not been
    /// granted; that is policy, not a failure. A zero or negative delay
    /// still schedules, firing as soon as possible.
    pub async fn schedule(&self, title: &str, options: NotifyOptions, delay_ms: i64) -> Option<String> {
        if *self.permission.lock().await != Permission::Granted {
            return None;
        }

        let id = Uuid::new_v4().to_string();
        let options = options.merged_defaults();
        let scheduled_for = self.clock.now() + Duration::milliseconds(delay_ms.max(0));

        // Register before spawning: on a multi-threaded runtime a
        // zero-delay timer could otherwise fire before its entry exists.
        self.pending.lock().await.insert(
            id.clone(),
            Pending {
                scheduled_for,
                handle: None,
            },
        );

        let pending = Arc::clone(&self.pending);
        let capability = Arc::clone(&self.capability);
        let fire_id = id.clone();
        let fire_title = title.to_string();
        let handle = tokio::spawn(async move {
            let delay = std::time::Duration::from_millis(delay_ms.max(0) as u64);
            tokio::time::sleep(delay).await;
            // Firing and cancellation race on the map; whoever removes
            // the entry wins.
            if pending.lock().await.remove(&fire_id).is_some() {
                tracing::debug!(id = %fire_id, "notification fired");
                capability.show(&fire_title, &options);
            }
        });

        if let Some(entry) = self.pending.lock().await.get_mut(&id) {
            entry.handle = Some(handle);
        }

        tracing::debug!(id = %id, delay_ms, "notification scheduled");
        Some(id)
    }

    /// Cancel a pending notification. Unknown ids, including ones that
    /// have already fired, are ignored.
    pub async fn cancel(&self, id: &str) {
        if let Some(entry) = self.pending.lock().await.remove(id) {
            if let Some(handle) = entry.handle {
                handle.abort();
            }
            tracing::debug!(id, "notification cancelled");
        }
    }

    /// Schedule a reminder `lead_minutes` before the task's time on `date`.
    ///
    /// Returns `None` when the task is untimed (or its time is malformed),
    /// when the local due instant does not exist (DST gap), or when the
    /// lead window has already passed. A reminder that should already have
    /// fired is never scheduled.
    pub async fn notify_task(
        &self,
        task: &Task,
        date: NaiveDate,
        lead_minutes: i64,
    ) -> Option<String> {
        let time = task.parsed_time()?;
        let due = date.and_time(time).and_local_timezone(Local).earliest()?;

        let delay_ms = (due - self.clock.now()).num_milliseconds() - lead_minutes * 60_000;
        if delay_ms <= 0 {
            return None;
        }

        let raw_time = task.time.as_deref().unwrap_or_default();
        let options = NotifyOptions {
            body: format!("'{}' starts at {}", task.title, raw_time),
            actions: vec![
                NotifyAction {
                    action: "complete".to_string(),
                    title: "Mark complete".to_string(),
                },
                NotifyAction {
                    action: "snooze".to_string(),
                    title: "Snooze 10 min".to_string(),
                },
            ],
            ..Default::default()
        };

        self.schedule(&format!("Reminder: {}", task.title), options, delay_ms)
            .await
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// The wall-clock instant a pending notification will fire at, if it
    /// is still pending.
    pub async fn scheduled_for(&self, id: &str) -> Option<DateTime<Local>> {
        self.pending.lock().await.get(id).map(|p| p.scheduled_for)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex as StdMutex;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    struct FakeCapability {
        available: bool,
        permission: Permission,
        prompt_result: Permission,
        shown: StdMutex<Vec<(String, NotifyOptions)>>,
    }

    impl FakeCapability {
        fn granted() -> Arc<Self> {
            Arc::new(FakeCapability {
                available: true,
                permission: Permission::Granted,
                prompt_result: Permission::Granted,
                shown: StdMutex::new(Vec::new()),
            })
        }

        fn shown(&self) -> Vec<(String, NotifyOptions)> {
            self.shown.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotifyCapability for FakeCapability {
        fn is_available(&self) -> bool {
            self.available
        }

        fn current_permission(&self) -> Permission {
            self.permission
        }

        async fn request_permission(&self) -> Permission {
            self.prompt_result
        }

        fn show(&self, title: &str, options: &NotifyOptions) {
            self.shown
                .lock()
                .unwrap()
                .push((title.to_string(), options.clone()));
        }
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn timed_task(time: &str) -> Task {
        Task::create(TaskDraft::new("Ordenha", "manejo").at(time), Utc::now())
    }

    #[tokio::test]
    async fn test_schedule_without_permission_is_refused() {
        let capability = Arc::new(FakeCapability {
            available: true,
            permission: Permission::Denied,
            prompt_result: Permission::Denied,
            shown: StdMutex::new(Vec::new()),
        });
        let scheduler = NotificationScheduler::new(capability);

        let id = scheduler
            .schedule("x", NotifyOptions::default(), 1_000)
            .await;
        assert_eq!(id, None);
        assert_eq!(scheduler.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_request_permission_unavailable_capability() {
        let capability = Arc::new(FakeCapability {
            available: false,
            permission: Permission::Default,
            prompt_result: Permission::Granted,
            shown: StdMutex::new(Vec::new()),
        });
        let scheduler = NotificationScheduler::new(capability);

        assert!(!scheduler.request_permission().await);
        assert_eq!(scheduler.permission().await, Permission::Default);
    }

    #[tokio::test]
    async fn test_request_permission_updates_state() {
        let capability = Arc::new(FakeCapability {
            available: true,
            permission: Permission::Default,
            prompt_result: Permission::Granted,
            shown: StdMutex::new(Vec::new()),
        });
        let scheduler = NotificationScheduler::new(capability);
        assert_eq!(scheduler.permission().await, Permission::Default);

        assert!(scheduler.request_permission().await);
        assert_eq!(scheduler.permission().await, Permission::Granted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_shows_and_removes_entry() {
        let capability = FakeCapability::granted();
        let scheduler = NotificationScheduler::new(capability.clone());

        let id = scheduler
            .schedule("Reminder", NotifyOptions::with_body("now"), 50)
            .await
            .unwrap();
        assert_eq!(scheduler.pending_count().await, 1);
        assert!(scheduler.scheduled_for(&id).await.is_some());

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let shown = capability.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "Reminder");
        assert_eq!(scheduler.pending_count().await, 0);
        assert!(scheduler.scheduled_for(&id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_icon_badge_tag_are_merged() {
        let capability = FakeCapability::granted();
        let scheduler = NotificationScheduler::new(capability.clone());

        scheduler
            .schedule("x", NotifyOptions::with_body("b"), 0)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let (_, options) = &capability.shown()[0];
        assert_eq!(options.icon.as_deref(), Some(DEFAULT_ICON));
        assert_eq!(options.badge.as_deref(), Some(DEFAULT_BADGE));
        assert_eq!(options.tag.as_deref(), Some(DEFAULT_TAG));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_fire_suppresses_notification() {
        let capability = FakeCapability::granted();
        let scheduler = NotificationScheduler::new(capability.clone());

        let id = scheduler
            .schedule("x", NotifyOptions::default(), 5_000)
            .await
            .unwrap();
        scheduler.cancel(&id).await;
        assert_eq!(scheduler.pending_count().await, 0);

        tokio::time::sleep(std::time::Duration::from_millis(10_000)).await;
        assert!(capability.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_is_noop() {
        let capability = FakeCapability::granted();
        let scheduler = NotificationScheduler::new(capability.clone());

        let id = scheduler
            .schedule("x", NotifyOptions::default(), 10)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(capability.shown().len(), 1);

        scheduler.cancel(&id).await;
        assert_eq!(capability.shown().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_delay_still_fires() {
        let capability = FakeCapability::granted();
        let scheduler = NotificationScheduler::new(capability.clone());

        scheduler
            .schedule("x", NotifyOptions::default(), -500)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        assert_eq!(capability.shown().len(), 1);
    }

    #[tokio::test]
    async fn test_notify_task_untimed_returns_none() {
        let scheduler = NotificationScheduler::new(FakeCapability::granted());
        let task = Task::create(TaskDraft::new("sem horario", "geral"), Utc::now());
        let date = local(2024, 3, 6, 0, 0).date_naive();

        assert_eq!(scheduler.notify_task(&task, date, 15).await, None);
    }

    #[tokio::test]
    async fn test_notify_task_past_lead_window_returns_none() {
        // Task at 08:00, lead 15 min, but it is already 07:50
        let now = local(2024, 3, 6, 7, 50);
        let scheduler = NotificationScheduler::with_clock(
            FakeCapability::granted(),
            Arc::new(FixedClock(now)),
        );

        let task = timed_task("08:00");
        let id = scheduler.notify_task(&task, now.date_naive(), 15).await;
        assert_eq!(id, None);
        assert_eq!(scheduler.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_notify_task_schedules_at_lead_offset() {
        // Task at 08:00, lead 15 min, now 07:00: fires at 07:45
        let now = local(2024, 3, 6, 7, 0);
        let scheduler = NotificationScheduler::with_clock(
            FakeCapability::granted(),
            Arc::new(FixedClock(now)),
        );

        let task = timed_task("08:00");
        let id = scheduler
            .notify_task(&task, now.date_naive(), 15)
            .await
            .unwrap();

        assert_eq!(
            scheduler.scheduled_for(&id).await,
            Some(local(2024, 3, 6, 7, 45))
        );
    }

    #[tokio::test]
    async fn test_notify_task_malformed_time_returns_none() {
        let scheduler = NotificationScheduler::new(FakeCapability::granted());
        let task = timed_task("8h30");
        let date = local(2024, 3, 6, 0, 0).date_naive();

        assert_eq!(scheduler.notify_task(&task, date, 15).await, None);
    }
}
