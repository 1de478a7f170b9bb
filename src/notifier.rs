//! Desktop notification capability backed by notify-rust.

use async_trait::async_trait;
use campo_core::{NotifyCapability, NotifyOptions, Permission};
use notify_rust::Notification;

/// Desktop notifications have no browser-style permission prompt; the
/// capability reports granted and lets the notification daemon decide.
pub struct DesktopNotifier;

#[async_trait]
impl NotifyCapability for DesktopNotifier {
    fn is_available(&self) -> bool {
        true
    }

    fn current_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn show(&self, title: &str, options: &NotifyOptions) {
        let mut notification = Notification::new();
        notification.summary(title).body(&options.body);
        if let Some(icon) = &options.icon {
            notification.icon(icon);
        }

        if let Err(error) = notification.show() {
            eprintln!("Failed to show notification: {error}");
        }
    }
}
