use gloo::file::callbacks::FileReader;
use web_sys::{Blob, File, HtmlInputElement};

use kabegami_core::VideoHandle;

/// A `blob:` URL that is revoked when dropped.
pub(crate) struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub(crate) fn from_blob(blob: &Blob) -> Result<Self, String> {
        let url = web_sys::Url::create_object_url_with_blob(blob)
            .map_err(|_| "failed to create object url".to_string())?;
        Ok(Self { url })
    }
}

impl VideoHandle for ObjectUrl {
    fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = web_sys::Url::revoke_object_url(&self.url);
    }
}

pub(crate) fn first_selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

pub(crate) fn describe_file(file: &File) -> String {
    format!("{} ({}, {} bytes)", file.name(), file.type_(), file.size() as u64)
}

/// Reads `file` into a `data:` URL. Dropping the returned reader aborts the read.
pub(crate) fn read_image_data_url<F>(file: File, on_done: F) -> FileReader
where
    F: FnOnce(Result<String, String>) + 'static,
{
    let file = gloo::file::File::from(file);
    gloo::file::callbacks::read_as_data_url(&file, move |result| {
        on_done(result.map_err(|err| format!("failed to read image: {err}")));
    })
}
