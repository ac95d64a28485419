//! Append-only conversation state for one run

use serde::{Deserialize, Serialize};

use crate::llm::Message;

/// System prompt plus every message exchanged so far, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    system: String,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn system(&self) -> &str {
        &self.system
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn test_push_keeps_order() {
        let mut conversation = Conversation::new("system");
        assert!(conversation.is_empty());

        conversation.push(Message::user("puzzle"));
        conversation.push(Message::assistant("42"));

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.system(), "system");
        assert_eq!(conversation.messages()[0].role, Role::User);
        assert_eq!(conversation.messages().last().map(|m| m.text()), Some("42".to_string()));
    }

    #[test]
    fn test_serializes_system_and_messages() {
        let mut conversation = Conversation::new("system");
        conversation.push(Message::user("puzzle"));

        let value = serde_json::to_value(&conversation).unwrap();
        assert_eq!(value["system"], "system");
        assert_eq!(value["messages"][0]["content"], "puzzle");
    }
}
