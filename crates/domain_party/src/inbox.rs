//! Secure message inboxes
//!
//! Every person and every exchange profile owns an inbox that starts with
//! a welcome message from the exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{InboxId, MessageId, SiteSettings};

/// Folder a message is filed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFolder {
    Inbox,
    Sent,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub subject: String,
    pub body: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub message_read: bool,
    /// Messages without a folder are treated as being in the inbox
    pub folder: Option<MessageFolder>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: MessageId::new_v7(),
            subject: subject.into(),
            body: body.into(),
            from: None,
            to: None,
            message_read: false,
            folder: None,
            created_at: Utc::now(),
        }
    }

    pub fn from_sender(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to_recipient(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn in_folder(mut self, folder: MessageFolder) -> Self {
        self.folder = Some(folder);
        self
    }

    pub fn mark_as_read(&mut self) {
        self.message_read = true;
    }

    fn is_in_inbox(&self, allow_unfiled: bool) -> bool {
        match self.folder {
            Some(MessageFolder::Inbox) => true,
            None => allow_unfiled,
            Some(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbox {
    pub id: InboxId,
    /// Inbox id followed by 20 random hex characters
    pub access_key: String,
    messages: Vec<Message>,
}

impl Inbox {
    pub fn new() -> Self {
        let id = InboxId::new();
        let random = Uuid::new_v4().simple().to_string();
        Self {
            id,
            access_key: format!("{}{}", id, &random[..20]),
            messages: Vec::new(),
        }
    }

    /// A new inbox holding the site's welcome message
    pub fn with_welcome(site: &SiteSettings) -> Self {
        let mut inbox = Self::new();
        inbox.post_message(
            Message::new(site.welcome_subject(), site.welcome_body())
                .from_sender(site.short_name.clone())
                .in_folder(MessageFolder::Inbox),
        );
        inbox
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn post_message(&mut self, message: Message) -> &mut Self {
        debug!(inbox = %self.id, message = %message.id, "Message posted");
        self.messages.push(message);
        self
    }

    /// Removes the message with `id`; unknown ids are ignored
    pub fn delete_message(&mut self, id: MessageId) -> &mut Self {
        self.messages.retain(|m| m.id != id);
        self
    }

    pub fn find_message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Read messages filed in the inbox folder
    pub fn read_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| m.message_read && m.is_in_inbox(false))
    }

    /// Unread messages in the inbox folder or in no folder
    pub fn unread_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| !m.message_read && m.is_in_inbox(true))
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_key_format() {
        let inbox = Inbox::new();
        let prefix = inbox.id.to_string();
        assert!(inbox.access_key.starts_with(&prefix));

        let suffix = &inbox.access_key[prefix.len()..];
        assert_eq!(suffix.len(), 20);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_welcome_message() {
        let inbox = Inbox::with_welcome(&SiteSettings::default());
        assert_eq!(inbox.messages().len(), 1);

        let welcome = &inbox.messages()[0];
        assert_eq!(welcome.subject, "Welcome to DC Health Link");
        assert_eq!(welcome.from.as_deref(), Some("DC Health Link"));
        assert_eq!(inbox.unread_messages().count(), 1);
    }

    #[test]
    fn test_read_and_unread_folders() {
        let mut inbox = Inbox::new();
        inbox
            .post_message(Message::new("unfiled", "body"))
            .post_message(Message::new("filed", "body").in_folder(MessageFolder::Inbox))
            .post_message(Message::new("sent", "body").in_folder(MessageFolder::Sent));

        let mut read = Message::new("read unfiled", "body");
        read.mark_as_read();
        inbox.post_message(read);

        let unread: Vec<_> = inbox.unread_messages().map(|m| m.subject.as_str()).collect();
        assert_eq!(unread, vec!["unfiled", "filed"]);
        assert_eq!(inbox.read_messages().count(), 0);

        let filed = inbox.messages()[1].id;
        inbox.find_message_mut(filed).unwrap().mark_as_read();
        assert_eq!(inbox.read_messages().count(), 1);
        assert_eq!(inbox.unread_messages().count(), 1);
    }

    #[test]
    fn test_delete_message() {
        let mut inbox = Inbox::with_welcome(&SiteSettings::default());
        let id = inbox.messages()[0].id;

        inbox.delete_message(MessageId::new());
        assert_eq!(inbox.messages().len(), 1);

        inbox.delete_message(id);
        assert!(inbox.messages().is_empty());
        inbox.delete_message(id);
    }
}
