//! Core traits.

/// A resource type with its own cache key namespace and route family.
pub trait Resource {
    /// Singular lowercase name, unique per entity type (e.g. `album`).
    const NAME: &'static str;
}

/// Resource names in use.
pub mod resources {
    pub const ALBUM: &str = "album";
    pub const BOOK: &str = "book";
    pub const PHOTO: &str = "photo";
    pub const SONG: &str = "song";
    pub const TEAM: &str = "team";
    pub const PET: &str = "pet";
    pub const COMMENT: &str = "comment";
    pub const USER: &str = "user";
    pub const FILE: &str = "file";
}
