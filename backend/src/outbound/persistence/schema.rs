//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Sales owned by a single user.
    sale (id) {
        /// Primary key; UUID v4 text generated by the service.
        #[max_length = 191]
        id -> Varchar,
        /// Integer amount.
        total -> Int4,
        /// Owning session user.
        #[max_length = 256]
        user_id -> Varchar,
    }
}
