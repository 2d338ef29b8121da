//! Diesel schema for message persistence.

diesel::table! {
    /// Message records forming the board history.
    messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Conversation the message belongs to.
        conversation_id -> Uuid,
        /// Author of the message.
        author_id -> Uuid,
        /// Optional reply-thread parent.
        parent_id -> Nullable<Uuid>,
        /// Textual content.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Monotonic write position; `load_all` replays history in this
        /// order.
        seq -> Int8,
    }
}
