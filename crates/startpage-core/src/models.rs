use serde::{Deserialize, Serialize};

/// One entry in the bookmarks bar
///
/// No uniqueness constraint - two identical bookmarks are two chips.
/// Entries are identified only by their position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// One entry in the todo list, ordered by insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    pub done: bool,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_serialization_shape() {
        let bookmark = Bookmark::new("Example", "https://example.com");
        let json = serde_json::to_string(&bookmark).unwrap();
        assert_eq!(json, r#"{"title":"Example","url":"https://example.com"}"#);
    }

    #[test]
    fn test_todo_starts_not_done() {
        let todo = TodoItem::new("water the plants");
        assert!(!todo.done);

        let json = serde_json::to_string(&todo).unwrap();
        assert_eq!(json, r#"{"text":"water the plants","done":false}"#);
    }
}
