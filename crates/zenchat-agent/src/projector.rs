// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Projection of the conversation log into a completion request.

use zenchat_core::{CompletionRequest, Message, Part, Speaker, Turn};

/// Text sent alongside an attachment when the user typed nothing.
pub const DEFAULT_ATTACHMENT_INSTRUCTION: &str = "Please describe the contents of this file.";

/// Builds the request for `messages`, oldest first.
///
/// Every message becomes one turn. User messages map to [`Speaker::User`] and
/// bot messages to [`Speaker::Model`]. The text part always comes first; an
/// attachment adds an inline-data part after it.
pub fn project(messages: &[Message], system_instruction: &str) -> CompletionRequest {
    CompletionRequest {
        system_instruction: system_instruction.to_string(),
        turns: messages.iter().map(to_turn).collect(),
    }
}

fn to_turn(message: &Message) -> Turn {
    match message {
        Message::Bot(bot) => Turn {
            speaker: Speaker::Model,
            parts: vec![Part::Text(bot.content.clone())],
        },
        Message::User(user) => {
            let Some(attachment) = &user.attachment else {
                return Turn {
                    speaker: Speaker::User,
                    parts: vec![Part::Text(user.content.clone())],
                };
            };

            let text = if user.content.is_empty() {
                DEFAULT_ATTACHMENT_INSTRUCTION.to_string()
            } else {
                user.content.clone()
            };
            Turn {
                speaker: Speaker::User,
                parts: vec![
                    Part::Text(text),
                    Part::InlineData {
                        mime_type: attachment.mime_type.clone(),
                        data: attachment.data.clone(),
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zenchat_core::{Attachment, AttachmentKind, BotMessage, ConversationLog, UserMessage};

    fn user(text: &str) -> Message {
        Message::User(UserMessage {
            content: text.into(),
            attachment: None,
        })
    }

    fn bot(text: &str) -> Message {
        Message::Bot(BotMessage::plain(text))
    }

    fn png() -> Attachment {
        Attachment {
            data: "iVBORw0KGgo=".into(),
            mime_type: "image/png".into(),
            name: "cat.png".into(),
            kind: AttachmentKind::Image,
        }
    }

    #[test]
    fn text_only_log_projects_one_turn_per_message() {
        let log = vec![bot("Hi!"), user("hello"), bot("How can I help?"), user("tell me more")];
        let request = project(&log, "persona");

        assert_eq!(request.turns.len(), 4);
        assert_eq!(request.system_instruction, "persona");
        let speakers: Vec<Speaker> = request.turns.iter().map(|t| t.speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::Model, Speaker::User, Speaker::Model, Speaker::User]
        );
        for (turn, message) in request.turns.iter().zip(&log) {
            assert_eq!(turn.parts, vec![Part::Text(message.content().to_string())]);
        }
    }

    #[test]
    fn empty_text_with_attachment_uses_default_instruction() {
        let log = vec![Message::User(UserMessage {
            content: String::new(),
            attachment: Some(png()),
        })];
        let request = project(&log, "persona");

        assert_eq!(
            request.turns[0].parts,
            vec![
                Part::Text(DEFAULT_ATTACHMENT_INSTRUCTION.into()),
                Part::InlineData {
                    mime_type: "image/png".into(),
                    data: "iVBORw0KGgo=".into(),
                },
            ]
        );
    }

    #[test]
    fn document_marker_text_is_sent_as_is() {
        let log = vec![Message::User(UserMessage {
            content: "[FILE] notes.txt\n".into(),
            attachment: Some(Attachment {
                data: "aGk=".into(),
                mime_type: "text/plain".into(),
                name: "notes.txt".into(),
                kind: AttachmentKind::Document,
            }),
        })];
        let request = project(&log, "persona");
        assert_eq!(request.turns[0].parts[0], Part::Text("[FILE] notes.txt\n".into()));
    }

    #[test]
    fn empty_text_without_attachment_stays_empty() {
        let request = project(&[bot("")], "persona");
        assert_eq!(request.turns[0].parts, vec![Part::Text(String::new())]);
    }

    #[test]
    fn projection_does_not_mutate_the_log() {
        let mut log = ConversationLog::seeded("Hi!");
        log.push(Message::User(UserMessage {
            content: String::new(),
            attachment: Some(png()),
        }));
        let before = log.clone();
        let _ = project(log.messages(), "persona");
        assert_eq!(log, before);
    }
}
