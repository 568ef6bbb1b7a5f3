//! Notification reads and read-state writes.

// self
use crate::{
	_prelude::*,
	api::{ApiCall, models::NotificationPage},
	flows::{Client, common},
	http::HttpTransport,
	obs::Operation,
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the unread count for the bell badge.
	pub async fn unread_count(&self) -> Result<u32> {
		let call = ApiCall::get("/api/notifications").with_query("unreadOnly", "true");

		self.coalesced(Operation::UnreadCount, async {
			let response = self.send_authenticated(&call).await?;

			common::payload::<NotificationPage>(&response, "Failed to load notifications")
				.map(|page| page.badge_count())
		})
		.await
	}

	/// Fetches one page of notifications, newest first.
	pub async fn notifications(&self, page: u32) -> Result<NotificationPage> {
		let call = ApiCall::get("/api/notifications").with_query("page", page.to_string());

		self.coalesced(Operation::Notifications, async {
			let response = self.send_authenticated(&call).await?;

			common::payload(&response, "Failed to load notifications")
		})
		.await
	}

	/// Marks a single notification as read.
	pub async fn mark_notification_read(&self, id: &str) -> Result<()> {
		self.submit(Operation::MarkNotificationRead, Some(id), async {
			let call = ApiCall::put(format!("/api/notifications/{id}/read"));
			let response = self.send_authenticated(&call).await?;

			common::acknowledged(&response, "Failed to update the notification").map(|_| ())
		})
		.await
	}

	/// Marks every notification as read; yields the server's confirmation message.
	pub async fn mark_all_notifications_read(&self) -> Result<String> {
		self.submit(Operation::MarkAllNotificationsRead, None, async {
			let call = ApiCall::put("/api/notifications/read-all");
			let response = self.send_authenticated(&call).await?;
			let message = common::acknowledged(&response, "Failed to update notifications")?;

			Ok(message.unwrap_or_else(|| "All notifications marked as read".into()))
		})
		.await
	}
}
