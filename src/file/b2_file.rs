use super::{DeleteFileVersion, DownloadFile, GetFileInfo};
use crate::session::B2Session;
use std::borrow::Cow;

/// B2文件，实现了查询文件信息、删除文件版本、下载文件等API
#[derive(Debug, Clone)]
pub struct B2File {
    pub(crate) b2: B2Session,
    pub(crate) file_id: Cow<'static, str>,
}

impl B2File {
    pub(crate) fn new(b2: B2Session, file_id: impl ToString) -> Self {
        B2File {
            b2,
            file_id: file_id.to_string().into(),
        }
    }
    /// 查询文件的详细元信息
    pub fn get_file_info(&self) -> GetFileInfo {
        GetFileInfo::new(self.clone())
    }
    /// 删除此文件版本
    ///
    /// B2要求删除时同时提供文件ID和文件名
    pub fn delete_file_version(&self, file_name: impl ToString) -> DeleteFileVersion {
        DeleteFileVersion::new(self.clone(), file_name)
    }
    /// 下载文件内容
    pub fn download(&self) -> DownloadFile {
        DownloadFile::new(self.clone())
    }
}
