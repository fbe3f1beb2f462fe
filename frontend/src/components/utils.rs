use gloo_file::File as GlooFile;
use web_sys::FileList;

pub fn is_image(file: &web_sys::File) -> bool {
    file.type_().starts_with("image/")
}

pub fn extract_image_files(file_list: &FileList) -> Vec<GlooFile> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .filter(is_image)
        .map(GlooFile::from)
        .collect()
}

/// Numbers file reads so that only the most recently started one is applied,
/// whatever order they finish in.
#[derive(Debug, Default)]
pub struct ReadSequence {
    latest: u64,
}

impl ReadSequence {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, read: u64) -> bool {
        read == self.latest
    }
}
