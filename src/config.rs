/// File-name suffix that marks a dump as bzip2-compressed
pub const BZ2_FILE_EXTENSION: &str = ".bz2";

/// Leading bytes every bzip2 stream starts with
pub const BZ2_MAGIC: [u8; 2] = *b"BZ";

/// Buffer size for reading dump files
pub const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Buffer size for the JSON lines writers
pub const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// Progress update interval (tick every N pages)
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Wiktionary edition used when none is given on the command line
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Namespace of dictionary entries; everything else is a special page
pub const MAIN_NAMESPACE: i32 = 0;

/// Phrase separators inside one relation line
pub const DEFAULT_SEPARATORS: &[char] = &[',', ';'];
