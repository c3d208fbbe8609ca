// Storage key namespace
//
// The `_v1` suffix leaves room for a migration story if the serialized
// shape ever changes; the `sp_` prefix scopes the keys to this app.

/// Serialized array of bookmarks
pub const BOOKMARKS: &str = "sp_bookmarks_v1";

/// The note editor's single opaque content blob
pub const NOTE_CONTENT: &str = "sp_content_html_v1";

/// Serialized array of todo items
pub const TODOS: &str = "sp_todos_v1";
