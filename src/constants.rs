pub struct Constants;

impl Constants {
    pub const REPOSITORY_FOLDER_NAME: &'static str = ".gitlite";
    pub const OBJECTS_FOLDER_NAME: &'static str = "objects";
    pub const REFS_FOLDER_NAME: &'static str = "refs";
    pub const HEADS_FOLDER_NAME: &'static str = "heads";
    pub const LOGS_FOLDER_NAME: &'static str = "logs";
    pub const INDEX_NAME: &'static str = "index";
    pub const HEAD_NAME: &'static str = "HEAD";
    pub const HEAD_CONTENT_HEADER: &'static str = "ref: ";
    pub const DEFAULT_BRANCH_REF: &'static str = "refs/heads/master";
    pub const DEFAULT_IDENTITY: &'static str = "User <user@example.com>";
}
