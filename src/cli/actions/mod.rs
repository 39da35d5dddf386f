use crate::stream::compression::Compression;
use std::path::PathBuf;

pub mod put_directory;

#[derive(Debug)]
pub enum Action {
    PutDirectory {
        dir: PathBuf,
        acl: String,
        compression: Compression,
        sync: bool,
    },
}
