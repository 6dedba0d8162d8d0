//! Public message links

use digest_core::{ChatId, ChatKind, MessageId};

/// Offset between a supergroup's chat id and its id in `t.me/c/` links
const SUPERGROUP_ID_OFFSET: i64 = 1_000_000_000_000;

/// Build the public link of a message.
///
/// Groups link through the chat username, supergroups through the private
/// `t.me/c/` form with an optional forum thread. Other chats, groups
/// without a username, and supergroup ids outside the `i64` range of the
/// link form have no public link and yield an empty string.
pub fn message_link(
    kind: ChatKind,
    chat_id: ChatId,
    message_id: MessageId,
    username: Option<&str>,
    thread_id: Option<i64>,
) -> String {
    match kind {
        ChatKind::Group => match username.map(str::trim) {
            Some(name) if !name.is_empty() => format!("https://t.me/{name}/{message_id}"),
            _ => String::new(),
        },
        ChatKind::Supergroup => {
            let Some(internal_id) = chat_id
                .into_inner()
                .checked_neg()
                .and_then(|id| id.checked_sub(SUPERGROUP_ID_OFFSET))
            else {
                return String::new();
            };
            let mut link = format!("https://t.me/c/{internal_id}/{message_id}");
            if let Some(thread) = thread_id.filter(|&t| t != 0) {
                link.push_str(&format!("?thread={thread}"));
            }
            link
        }
        ChatKind::Private | ChatKind::Channel => String::new(),
    }
}
