//! Content types by file extension
//! <https://developer.mozilla.org/en-US/docs/Web/HTTP/Basics_of_HTTP/MIME_types/Common_types>

use std::{collections::HashMap, path::Path, sync::LazyLock};

// extension (with the leading dot) => content type
const TYPES: &[(&str, &str)] = &[
    (".aac", "audio/aac"),
    (".abw", "application/x-abiword"),
    (".arc", "application/x-freearc"),
    (".avi", "video/x-msvideo"),
    (".azw", "application/vnd.amazon.ebook"),
    (".bin", "application/octet-stream"),
    (".bmp", "image/bmp"),
    (".bz", "application/x-bzip"),
    (".bz2", "application/x-bzip2"),
    (".csh", "application/x-csh"),
    (".css", "text/css"),
    (".csv", "text/csv"),
    (".doc", "application/msword"),
    (
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (".eot", "application/vnd.ms-fontobject"),
    (".epub", "application/epub+zip"),
    (".gif", "image/gif"),
    (".htm", "text/html"),
    (".html", "text/html"),
    (".ico", "image/vnd.microsoft.icon"),
    (".ics", "text/calendar"),
    (".jar", "application/java-archive"),
    (".jpeg", "image/jpeg"),
    (".jpg", "image/jpeg"),
    (".js", "text/javascript"),
    (".json", "application/json"),
    (".mid", "audio/midi"),
    (".midi", "audio/midi"),
    (".mjs", "application/javascript"),
    (".mp3", "audio/mpeg"),
    (".mpeg", "video/mpeg"),
    (".mpkg", "application/vnd.apple.installer+xml"),
    (".odp", "application/vnd.oasis.opendocument.presentation"),
    (".ods", "application/vnd.oasis.opendocument.spreadsheet"),
    (".odt", "application/vnd.oasis.opendocument.text"),
    (".oga", "audio/ogg"),
    (".ogv", "video/ogg"),
    (".ogx", "application/ogg"),
    (".otf", "font/otf"),
    (".png", "image/png"),
    (".pdf", "application/pdf"),
    (".ppt", "application/vnd.ms-powerpoint"),
    (
        ".pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    (".rar", "application/x-rar-compressed"),
    (".rtf", "application/rtf"),
    (".sh", "application/x-sh"),
    (".svg", "image/svg+xml"),
    (".swf", "application/x-shockwave-flash"),
    (".tar", "application/x-tar"),
    (".tif", "image/tiff"),
    (".tiff", "image/tiff"),
    (".ttf", "font/ttf"),
    (".txt", "text/plain"),
    (".vsd", "application/vnd.visio"),
    (".wav", "audio/wav"),
    (".weba", "audio/webm"),
    (".webm", "video/webm"),
    (".webp", "image/webp"),
    (".woff", "font/woff"),
    (".woff2", "font/woff2"),
    (".xhtml", "application/xhtml+xml"),
    (".xls", "application/vnd.ms-excel"),
    (
        ".xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (".xml", "application/xml"),
    (".xul", "application/vnd.mozilla.xul+xml"),
    (".zip", "application/zip"),
    (".3gp", "video/3gpp"),
    (".3g2", "video/3gpp2"),
    (".7z", "application/x-7z-compressed"),
];

static MIME_TYPES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TYPES.iter().copied().collect());

/// Extension of the file name, leading dot included: `a/b.tar.gz` => `.gz`
#[must_use]
pub fn extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').and_then(|i| name.get(i..))
}

/// Case-sensitive lookup, `ext` must include the leading dot
#[must_use]
pub fn lookup(ext: &str) -> Option<&'static str> {
    MIME_TYPES.get(ext).copied()
}

#[must_use]
pub fn content_type(path: &Path) -> Option<&'static str> {
    extension(path).and_then(lookup)
}
