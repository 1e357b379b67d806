//! 存储空间是用于存储文件的容器，名称全局唯一，所有的文件都必须隶属于某个存储空间。

#[doc(hidden)]
pub use self::b2_bucket::B2Bucket;
pub use self::{
    get_upload_url::{GetUploadUrl, UploadUrl},
    hide_file::HideFile,
    list_file_names::{FileNameList, ListFileNames},
    list_file_versions::{FileVersionList, ListFileVersions},
    update_bucket::UpdateBucket,
    upload_file::UploadFile,
};

mod b2_bucket;
mod get_upload_url;
mod hide_file;
mod list_file_names;
mod list_file_versions;
mod update_bucket;
mod upload_file;
