// Buffer related constants
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

// Listing page size carried through the continuation-token protocol
pub const LIST_PAGE_SIZE: usize = 100;

// Filesystem provider default root
pub const DEFAULT_FS_ROOT: &str = "./storage";
