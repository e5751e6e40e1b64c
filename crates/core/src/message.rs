//! Message and Context domain types.
//!
//! These are the values handed to the chat API client:
//! a cell input becomes a `user` message, the value it produced a `system` one.

use serde::{Deserialize, Serialize};

/// The role of a message in the assembled context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Code submitted by the human
    User,
    /// Output produced by that code
    System,
}

/// A single role-tagged message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    content: String,
    role: Role,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::User,
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::System,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// The ordered message sequence submitted to a chat model as history.
///
/// Serializes as a bare JSON array, i.e. a chat-completion message list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    messages: Vec<Message>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("x = 1");
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.content(), "x = 1");
    }

    #[test]
    fn message_serializes_as_chat_record() {
        let msg = Message::system("4");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"content": "4", "role": "system"}));
    }

    #[test]
    fn context_serializes_as_array() {
        let mut ctx = Context::new();
        ctx.push(Message::user("y = 2"));
        ctx.push(Message::system("4"));

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"content": "y = 2", "role": "user"},
                {"content": "4", "role": "system"},
            ])
        );
    }

    #[test]
    fn context_deserializes_from_array() {
        let ctx: Context =
            serde_json::from_str(r#"[{"content": "a", "role": "user"}]"#).unwrap();
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.messages()[0], Message::user("a"));
    }
}
