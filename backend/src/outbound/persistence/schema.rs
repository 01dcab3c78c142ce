//! Diesel table definitions. Keep in step with `backend/migrations`.

diesel::table! {
    /// Published videos, one row per record.
    videos (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        video_url -> Text,
        thumbnail_url -> Text,
        controls -> Bool,
        height -> Int4,
        width -> Int4,
        quality -> Int2,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
