//! 文件是B2存储数据的基本单元，每次上传都会产生一个新版本，版本由全局唯一的文件ID标识。

#[doc(hidden)]
pub use self::b2_file::B2File;
pub use self::{
    delete_file_version::{DeleteFileVersion, DeletedFileVersion},
    download_file::DownloadFile,
    download_file_by_name::DownloadFileByName,
    get_file_info::GetFileInfo,
};

mod b2_file;
mod delete_file_version;
mod download_file;
mod download_file_by_name;
mod get_file_info;
